//! Source data profiles.
//!
//! A [`SourceProfile`] is everything that differs between two statistics
//! sources: where the indicator API lives (if any), which HTML pages to scrape
//! and how, the indicator catalog, and the reference table. One collector
//! engine runs against any profile.
//!
//! Profiles are built once at start-up, either from the built-ins below or
//! from JSON, then shared behind `Arc` and never mutated.

mod afdb;
mod imf;
mod un;
mod usaid;
mod world_bank;
mod zambia_stats;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use url::Url;

use crate::catalog::{IndicatorCatalog, ReferenceRow, ReferenceTable};
use crate::core::{Country, DsError};
use crate::core::client::constants::{
    DEFAULT_API_DELAY_MS, DEFAULT_API_TIMEOUT_SECS, DEFAULT_DATE_RANGE, DEFAULT_MAX_PER_PATTERN,
    DEFAULT_MAX_STRUCTURED, DEFAULT_PER_PAGE, DEFAULT_SCRAPE_TIMEOUT_SECS,
    DEFAULT_WORLD_BANK_API,
};

/// Indicator API settings (World Bank v2 layout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; `country/{iso3}/indicator/{code}` is appended.
    #[serde(default = "default_api_base")]
    pub base_url: String,
    #[serde(default = "default_date_range")]
    pub date_range: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
    /// Pause between consecutive indicator requests.
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            date_range: default_date_range(),
            per_page: default_per_page(),
            timeout_secs: default_api_timeout(),
            delay_ms: default_delay(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// A free-text extraction rule.
///
/// `regex` is matched case-insensitively against the page's plain text; the
/// first capture group (or the whole match) becomes the record value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub label: String,
    pub regex: String,
    /// Topics this rule applies to; empty means every topic.
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Prepended to the captured value, e.g. `$`.
    #[serde(default)]
    pub value_prefix: Option<String>,
}

impl PatternSpec {
    pub fn new(label: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            regex: regex.into(),
            topics: Vec::new(),
            unit: None,
            value_prefix: None,
        }
    }

    #[must_use]
    pub fn for_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn value_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.value_prefix = Some(prefix.into());
        self
    }
}

/// HTML scrape settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL templates (`{country}`, `{iso3}`, `{m49}`), tried in order.
    pub pages: Vec<String>,
    /// Topic -> words that make an element "statistic-like". Key `*` applies to every topic.
    #[serde(default = "default_topic_keywords")]
    pub keywords: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_unit_keywords")]
    pub unit_keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<PatternSpec>,
    #[serde(default = "default_max_structured")]
    pub max_structured: usize,
    #[serde(default = "default_max_per_pattern")]
    pub max_per_pattern: usize,
    #[serde(default = "default_scrape_timeout")]
    pub timeout_secs: u64,
}

impl ScrapeConfig {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| (*p).to_string()).collect(),
            keywords: default_topic_keywords(),
            unit_keywords: default_unit_keywords(),
            patterns: Vec::new(),
            max_structured: default_max_structured(),
            max_per_pattern: default_max_per_pattern(),
            timeout_secs: default_scrape_timeout(),
        }
    }

    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<PatternSpec>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Add words that count as statistic-like for every topic.
    #[must_use]
    pub fn with_global_keywords(mut self, words: &[&str]) -> Self {
        self.keywords
            .entry("*".to_string())
            .or_default()
            .extend(words.iter().map(|w| (*w).to_string()));
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete configuration of one statistics source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Router key, e.g. `world_bank`.
    pub id: String,
    /// Display name, e.g. `World Bank`.
    pub name: String,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub scrape: Option<ScrapeConfig>,
    #[serde(default)]
    pub catalog: IndicatorCatalog,
    #[serde(default)]
    pub reference: ReferenceTable,
}

impl SourceProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            api: None,
            scrape: None,
            catalog: IndicatorCatalog::default(),
            reference: ReferenceTable::default(),
        }
    }

    #[must_use]
    pub fn with_api(mut self, api: ApiConfig) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn with_scrape(mut self, scrape: ScrapeConfig) -> Self {
        self.scrape = Some(scrape);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: IndicatorCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ReferenceTable) -> Self {
        self.reference = reference;
        self
    }

    /// `Source` label on records produced by the API step.
    pub fn api_label(&self) -> String {
        format!("{} API", self.name)
    }

    /// `Source` label on records produced by the scrape step.
    pub fn scrape_label(&self) -> String {
        format!("{} Website", self.name)
    }

    /// `Source` label on records produced by the reference step.
    pub fn reference_label(&self) -> String {
        format!("{} Reference Data", self.name)
    }

    pub fn validate(&self) -> Result<(), DsError> {
        if self.id.trim().is_empty() {
            return Err(DsError::Config("source profile has an empty id".into()));
        }
        if self.name.trim().is_empty() {
            return Err(DsError::Config(format!(
                "source profile `{}` has an empty name",
                self.id
            )));
        }
        if let Some(scrape) = &self.scrape
            && scrape.pages.is_empty()
        {
            return Err(DsError::Config(format!(
                "source profile `{}` has a scrape section without pages",
                self.id
            )));
        }

        if let Some(api) = &self.api {
            Url::parse(&api.base_url).map_err(|e| {
                DsError::Config(format!(
                    "source profile `{}` has an invalid api base_url `{}`: {e}",
                    self.id, api.base_url
                ))
            })?;
        }
        if let Some(scrape) = &self.scrape {
            let sample = Country::default();
            for page in &scrape.pages {
                Url::parse(&sample.render(page)).map_err(|e| {
                    DsError::Config(format!(
                        "source profile `{}` has an invalid page template `{page}`: {e}",
                        self.id
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// The six built-in profiles, in router order.
pub fn builtin() -> Vec<SourceProfile> {
    vec![
        world_bank::profile(),
        imf::profile(),
        usaid::profile(),
        un::profile(),
        afdb::profile(),
        zambia_stats::profile(),
    ]
}

/// Parse a JSON array of profiles and validate each one.
pub fn profiles_from_json(json: &str) -> Result<Vec<SourceProfile>, DsError> {
    let profiles: Vec<SourceProfile> = serde_json::from_str(json)
        .map_err(|e| DsError::Config(format!("profile json parse: {e}")))?;
    for p in &profiles {
        p.validate()?;
    }
    Ok(profiles)
}

/// Read and parse a JSON profile file.
pub fn profiles_from_path(path: impl AsRef<Path>) -> Result<Vec<SourceProfile>, DsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| DsError::Config(format!("reading {}: {e}", path.display())))?;
    profiles_from_json(&text)
}

/* ----- serde defaults ----- */

fn default_api_base() -> String {
    DEFAULT_WORLD_BANK_API.to_string()
}
fn default_date_range() -> String {
    DEFAULT_DATE_RANGE.to_string()
}
fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}
fn default_api_timeout() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}
fn default_delay() -> u64 {
    DEFAULT_API_DELAY_MS
}
fn default_scrape_timeout() -> u64 {
    DEFAULT_SCRAPE_TIMEOUT_SECS
}
fn default_max_structured() -> usize {
    DEFAULT_MAX_STRUCTURED
}
fn default_max_per_pattern() -> usize {
    DEFAULT_MAX_PER_PATTERN
}

fn default_unit_keywords() -> Vec<String> {
    ["%", "percent", "million", "billion", "trillion"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_topic_keywords() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 6] = [
        (
            "population",
            &["population", "people", "inhabitants", "households", "density"],
        ),
        (
            "health",
            &["health", "life expectancy", "mortality", "hiv", "malaria", "immunization"],
        ),
        (
            "education",
            &["education", "literacy", "enrollment", "enrolment", "school", "completion"],
        ),
        (
            "economy",
            &["gdp", "inflation", "growth", "debt", "unemployment", "poverty"],
        ),
        (
            "agriculture",
            &["agricultur", "crop", "cereal", "farm", "arable", "maize"],
        ),
        ("mining", &["mining", "copper", "mineral", "cobalt", "tonnes"]),
    ];
    table
        .iter()
        .map(|(topic, words)| {
            (
                (*topic).to_string(),
                words.iter().map(|w| (*w).to_string()).collect(),
            )
        })
        .collect()
}

/* ----- helpers for the built-in tables ----- */

/// `(indicator, value, unit)` text rows sharing one year.
fn text_rows(year: Option<&str>, rows: &[(&str, &str, &str)]) -> Vec<ReferenceRow> {
    rows.iter()
        .map(|(indicator, value, unit)| {
            let mut row = ReferenceRow::new(*indicator, *value);
            if !unit.is_empty() {
                row = row.unit(*unit);
            }
            if let Some(y) = year {
                row = row.year(y);
            }
            row
        })
        .collect()
}

/// `(indicator, number, unit, period)` numeric rows.
fn number_rows(rows: &[(&str, f64, &str, &str)]) -> Vec<ReferenceRow> {
    rows.iter()
        .map(|(indicator, value, unit, period)| {
            let mut row = ReferenceRow::new(*indicator, *value);
            if !unit.is_empty() {
                row = row.unit(*unit);
            }
            row.year(*period)
        })
        .collect()
}
