//! CSV and JSON rendering of collected records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::core::{DsError, RECORD_COLUMNS, Record};

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Spreadsheet names are accepted and served as CSV.
impl FromStr for ExportFormat {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "excel" | "xlsx" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(DsError::InvalidParams(format!(
                "unsupported export format `{other}`"
            ))),
        }
    }
}

/// Provenance written alongside exported records.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMeta {
    pub source: String,
    pub data_type: String,
    pub generated_at: DateTime<Utc>,
}

impl ExportMeta {
    /// Stamped with the current time.
    pub fn new(source: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data_type: data_type.into(),
            generated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }
}

fn ensure_records(records: &[Record]) -> Result<(), DsError> {
    if records.is_empty() {
        return Err(DsError::InvalidParams("no records to export".into()));
    }
    Ok(())
}

/// Header row of [`RECORD_COLUMNS`], then one row per record.
pub fn to_csv(records: &[Record]) -> Result<String, DsError> {
    ensure_records(records)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.write_record(record.columns())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DsError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DsError::Export(e.to_string()))
}

/// Pretty JSON: `{"metadata": {...}, "data": [...]}`.
pub fn to_json(records: &[Record], meta: &ExportMeta) -> Result<String, DsError> {
    ensure_records(records)?;

    let doc = json!({
        "metadata": {
            "source": meta.source,
            "data_type": meta.data_type,
            "generated_date": meta.generated_at.to_rfc3339(),
            "total_records": records.len(),
        },
        "data": records,
    });
    serde_json::to_string_pretty(&doc).map_err(|e| DsError::Export(e.to_string()))
}

/// Render in `format`.
pub fn render(
    records: &[Record],
    meta: &ExportMeta,
    format: ExportFormat,
) -> Result<String, DsError> {
    match format {
        ExportFormat::Csv => to_csv(records),
        ExportFormat::Json => to_json(records, meta),
    }
}

/// `{country}_{source}_{topic}_{YYYYmmdd_HHMMSS}.{ext}`, lowercased. Anything
/// other than ASCII letters, digits, `-` and `.` becomes an underscore.
pub fn file_name(country: &str, meta: &ExportMeta, format: ExportFormat) -> String {
    let stem = format!(
        "{}_{}_{}_{}",
        country,
        meta.source,
        meta.data_type,
        meta.generated_at.format("%Y%m%d_%H%M%S")
    );
    let stem: String = stem
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '.' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect();
    format!("{stem}.{}", format.extension())
}
