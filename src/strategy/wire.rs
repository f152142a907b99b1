//! Minimal serde mapping for the World Bank v2 indicator payload:
//! `[ {page metadata}, [ {observation}, ... ] | null ]`.

use serde::Deserialize;
use serde_json::Value as Json;

use crate::catalog::Indicator;
use crate::core::{Country, DsError, Record, Value};

#[derive(Deserialize)]
pub(crate) struct Observation {
    #[serde(default)]
    indicator: Option<IndicatorNode>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    value: Option<Json>,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Deserialize)]
struct IndicatorNode {
    #[serde(default)]
    value: Option<String>,
}

/// Decode the observation list. A `null` or missing second element is an
/// empty list; an upstream `message` envelope is a data error.
pub(crate) fn decode_observations(body: &str) -> Result<Vec<Observation>, DsError> {
    let root: Json = serde_json::from_str(body)
        .map_err(|e| DsError::Data(format!("indicator json parse: {e}")))?;
    let parts = root
        .as_array()
        .ok_or_else(|| DsError::Data("indicator payload is not an array".into()))?;

    if let Some(message) = parts.first().and_then(|m| m.get("message")) {
        return Err(DsError::Data(format!("upstream message: {message}")));
    }

    match parts.get(1) {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(list) => serde_json::from_value(list.clone())
            .map_err(|e| DsError::Data(format!("indicator observations: {e}"))),
    }
}

impl Observation {
    /// `None` for observations without a value.
    pub(crate) fn into_record(
        self,
        indicator: &Indicator,
        country: &Country,
        source: &str,
    ) -> Option<Record> {
        let value = match self.value? {
            Json::Number(n) => Value::Number(n.as_f64()?),
            Json::String(s) if !s.trim().is_empty() => Value::Text(s),
            _ => return None,
        };

        let name = if indicator.name.is_empty() {
            self.indicator
                .and_then(|i| i.value)
                .unwrap_or_else(|| indicator.code.clone())
        } else {
            indicator.name.clone()
        };

        let mut record = Record::new(name, value, &country.name, source).with_code(&indicator.code);
        if let Some(date) = self.date {
            record = record.with_year(date);
        }
        if let Some(unit) = self.unit.filter(|u| !u.trim().is_empty()) {
            record = record.with_unit(unit);
        }
        Some(record)
    }
}
