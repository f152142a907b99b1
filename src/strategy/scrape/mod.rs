//! HTML page step.
//!
//! Each configured page is fetched in order and run through two passes: a
//! structured pass over table rows and leaf text blocks, then a free-text
//! pass that applies the profile's regular expressions to the page's visible
//! text. The first page yielding any record wins.

mod structured;
mod text;
mod utils;

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use super::{AttemptFuture, Harvest, Strategy};
use crate::core::{DsClient, DsError, Record, Topic, net};
use crate::sources::{PatternSpec, ScrapeConfig, SourceProfile};

const GLOBAL_KEY: &str = "*";

/// What the records produced by an extraction are attributed to.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub topic: &'a Topic,
    pub country: &'a str,
    pub source: &'a str,
}

/// Output of both passes over one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub structured: Vec<Record>,
    pub text: Vec<Record>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.structured.is_empty() && self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.structured.len() + self.text.len()
    }

    /// Structured records first, then free-text ones.
    pub fn into_records(self) -> Vec<Record> {
        let mut records = self.structured;
        records.extend(self.text);
        records
    }
}

struct TextPattern {
    label: String,
    regex: Regex,
    topics: Vec<Topic>,
    unit: Option<String>,
    value_prefix: String,
}

impl TextPattern {
    fn compile(spec: &PatternSpec) -> Result<Self, DsError> {
        let regex = RegexBuilder::new(&spec.regex)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            label: spec.label.clone(),
            regex,
            topics: spec.topics.iter().map(|t| Topic::new(t)).collect(),
            unit: spec.unit.clone(),
            value_prefix: spec.value_prefix.clone().unwrap_or_default(),
        })
    }

    fn applies_to(&self, topic: &Topic) -> bool {
        self.topics.is_empty() || self.topics.contains(topic)
    }
}

/// Compiled extraction rules for one profile.
///
/// Pure: takes HTML text, returns records. Network access lives in
/// [`ScrapeStrategy`].
pub struct Extractor {
    patterns: Vec<TextPattern>,
    keywords: Vec<(Topic, Vec<String>)>,
    global_keywords: Vec<String>,
    unit_keywords: Vec<String>,
    max_structured: usize,
    max_per_pattern: usize,
}

impl Extractor {
    /// # Errors
    ///
    /// `DsError::Pattern` if a regular expression does not compile.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, DsError> {
        let patterns = config
            .patterns
            .iter()
            .map(TextPattern::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let mut keywords = Vec::new();
        let mut global_keywords = Vec::new();
        for (topic, words) in &config.keywords {
            if topic == GLOBAL_KEY {
                global_keywords.extend(lowered(words));
            } else {
                keywords.push((Topic::new(topic), lowered(words)));
            }
        }

        Ok(Self {
            patterns,
            keywords,
            global_keywords,
            unit_keywords: lowered(&config.unit_keywords),
            max_structured: config.max_structured,
            max_per_pattern: config.max_per_pattern,
        })
    }

    /// Run both passes over `html`.
    pub fn extract(&self, html: &str, ctx: &ExtractContext<'_>) -> Extraction {
        let doc = Html::parse_document(html);
        Extraction {
            structured: structured::extract(&doc, self, ctx),
            text: text::extract(&doc, self, ctx),
        }
    }

    /// Contains a unit word, a word for `topic`, or a source-wide word.
    fn is_statistic_like(&self, text: &str, topic: &Topic) -> bool {
        let lower = text.to_lowercase();
        let hit = |words: &[String]| words.iter().any(|w| lower.contains(w.as_str()));

        hit(&self.unit_keywords)
            || hit(&self.global_keywords)
            || self
                .keywords
                .iter()
                .any(|(t, words)| t == topic && hit(words))
    }
}

fn lowered(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Scrapes the profile's pages for a topic.
pub struct ScrapeStrategy {
    client: DsClient,
    profile: Arc<SourceProfile>,
    config: ScrapeConfig,
    extractor: Extractor,
}

impl ScrapeStrategy {
    /// # Errors
    ///
    /// `DsError::Config` if the profile has no scrape section and
    /// `DsError::Pattern` if one of its patterns does not compile.
    pub fn new(client: &DsClient, profile: Arc<SourceProfile>) -> Result<Self, DsError> {
        let config = profile.scrape.clone().ok_or_else(|| {
            DsError::Config(format!("source `{}` has no scrape configuration", profile.id))
        })?;
        let extractor = Extractor::from_config(&config)?;
        Ok(Self {
            client: client.clone(),
            profile,
            config,
            extractor,
        })
    }

    async fn run(&self, topic: &Topic) -> Result<Option<Harvest>, DsError> {
        let country = self.client.country();
        let label = self.profile.scrape_label();
        let ctx = ExtractContext {
            topic,
            country: &country.name,
            source: &label,
        };

        for template in &self.config.pages {
            let url = Url::parse(&country.render(template))?;

            let body = match net::get_text(&self.client, &url, self.config.timeout()).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(source = %self.profile.id, %url, error = %e, "page fetch failed");
                    continue;
                }
            };

            let extraction = self.extractor.extract(&body, &ctx);
            debug!(
                %url,
                structured = extraction.structured.len(),
                text = extraction.text.len(),
                "page extracted"
            );
            if extraction.is_empty() {
                continue;
            }

            let structured_count = extraction.structured.len();
            let text_count = extraction.text.len();
            return Ok(Some(
                Harvest::new(extraction.into_records())
                    .with_param("url", url.as_str())
                    .with_param("structured_count", structured_count)
                    .with_param("text_count", text_count),
            ));
        }

        Ok(None)
    }
}

impl Strategy for ScrapeStrategy {
    fn attempt<'a>(&'a self, topic: &'a Topic) -> AttemptFuture<'a> {
        Box::pin(self.run(topic))
    }
}
