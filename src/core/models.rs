use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Parameters and counts describing one collection run.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Topics every built-in source understands.
pub const TOPICS: [&str; 6] = [
    "population",
    "health",
    "education",
    "economy",
    "agriculture",
    "mining",
];

/// Column names of a serialized [`Record`], in output order.
///
/// File exports and HTTP payloads rely on these staying put between runs.
pub const RECORD_COLUMNS: [&str; 8] = [
    "Indicator",
    "Indicator_Code",
    "Value",
    "Unit",
    "Year",
    "Country",
    "Source",
    "Note",
];

/* ----- TOPIC ----- */

/// A normalized (trimmed, lowercase) topic key such as `population`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `"population"` -> `"Population"`.
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Topic> for String {
    fn from(t: Topic) -> Self {
        t.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/* ----- VALUE ----- */

/// A statistic as the upstream reported it.
///
/// Sources mix plain numbers with descriptive strings such as
/// `"20.22 million (2025 est.)"`, so no numeric type is forced on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/* ----- RECORD ----- */

/// One normalized output row.
///
/// Every field is always serialized (absent optionals as `null`) so the key
/// set never changes between runs for the same source and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Indicator_Code", default)]
    pub indicator_code: Option<String>,
    #[serde(rename = "Value")]
    pub value: Value,
    #[serde(rename = "Unit", default)]
    pub unit: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
}

impl Record {
    pub fn new(
        indicator: impl Into<String>,
        value: impl Into<Value>,
        country: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            indicator_code: None,
            value: value.into(),
            unit: None,
            year: None,
            country: country.into(),
            source: source.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.indicator_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Field values as strings in [`RECORD_COLUMNS`] order; `None` becomes `""`.
    pub fn columns(&self) -> [String; 8] {
        let opt = |o: &Option<String>| o.clone().unwrap_or_default();
        [
            self.indicator.clone(),
            opt(&self.indicator_code),
            self.value.to_string(),
            opt(&self.unit),
            opt(&self.year),
            self.country.clone(),
            self.source.clone(),
            opt(&self.note),
        ]
    }
}

/* ----- COLLECTION RESULT ----- */

/// The records and run metadata of a successful collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub records: Vec<Record>,
    pub metadata: Metadata,
}

/// The envelope every collector returns: a non-empty record list with
/// metadata, or a human-readable error. Never both.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionResult {
    Success(Collection),
    Failure { error: String },
}

impl CollectionResult {
    pub fn failure(error: impl Into<String>) -> Self {
        CollectionResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CollectionResult::Success(_))
    }

    pub fn records(&self) -> &[Record] {
        match self {
            CollectionResult::Success(c) => &c.records,
            CollectionResult::Failure { .. } => &[],
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            CollectionResult::Success(c) => Some(&c.metadata),
            CollectionResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CollectionResult::Success(_) => None,
            CollectionResult::Failure { error } => Some(error),
        }
    }
}

impl Serialize for CollectionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CollectionResult::Success(c) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", &c.records)?;
                map.serialize_entry("metadata", &c.metadata)?;
                map.end()
            }
            CollectionResult::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}
