//! Static per-topic data: indicator codes for API lookups and literal
//! reference rows for the terminal fallback.
//!
//! Both maps normalize their keys through [`Topic`] on construction and on
//! deserialization, so lookups are case-insensitive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Topic, Value};

/// One external indicator code and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub code: String,
    pub name: String,
}

impl Indicator {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Topic -> ordered indicator list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<Indicator>>",
    into = "BTreeMap<String, Vec<Indicator>>"
)]
pub struct IndicatorCatalog {
    topics: BTreeMap<String, Vec<Indicator>>,
}

impl IndicatorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the indicator list for a topic.
    #[must_use]
    pub fn with_topic(mut self, topic: &str, indicators: &[(&str, &str)]) -> Self {
        let list = indicators
            .iter()
            .map(|(code, name)| Indicator::new(*code, *name))
            .collect();
        self.topics.insert(Topic::new(topic).into(), list);
        self
    }

    /// Indicators for a topic; empty for an unknown topic.
    pub fn indicators(&self, topic: &Topic) -> &[Indicator] {
        self.topics.get(topic.as_str()).map_or(&[], Vec::as_slice)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Vec<Indicator>>> for IndicatorCatalog {
    fn from(raw: BTreeMap<String, Vec<Indicator>>) -> Self {
        Self {
            topics: raw
                .into_iter()
                .map(|(k, v)| (Topic::new(&k).into(), v))
                .collect(),
        }
    }
}

impl From<IndicatorCatalog> for BTreeMap<String, Vec<Indicator>> {
    fn from(c: IndicatorCatalog) -> Self {
        c.topics
    }
}

/// A literal fallback row; country and source are filled in at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub indicator: String,
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl ReferenceRow {
    pub fn new(indicator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            indicator: indicator.into(),
            value: value.into(),
            unit: None,
            year: None,
        }
    }

    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }
}

/// Topic -> ordered list of literal rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<ReferenceRow>>",
    into = "BTreeMap<String, Vec<ReferenceRow>>"
)]
pub struct ReferenceTable {
    topics: BTreeMap<String, Vec<ReferenceRow>>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_topic(mut self, topic: &str, rows: Vec<ReferenceRow>) -> Self {
        self.topics.insert(Topic::new(topic).into(), rows);
        self
    }

    /// Rows for a topic; empty when the topic has no entry.
    pub fn rows(&self, topic: &Topic) -> &[ReferenceRow] {
        self.topics.get(topic.as_str()).map_or(&[], Vec::as_slice)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Vec<ReferenceRow>>> for ReferenceTable {
    fn from(raw: BTreeMap<String, Vec<ReferenceRow>>) -> Self {
        Self {
            topics: raw
                .into_iter()
                .map(|(k, v)| (Topic::new(&k).into(), v))
                .collect(),
        }
    }
}

impl From<ReferenceTable> for BTreeMap<String, Vec<ReferenceRow>> {
    fn from(t: ReferenceTable) -> Self {
        t.topics
    }
}
