//! Terminal step: literal rows from the profile's reference table.

use crate::core::{Country, Record, Topic};
use crate::sources::SourceProfile;

/// Note attached to every reference record so consumers can tell it from live data.
pub fn reference_note(source_name: &str) -> String {
    format!("Reference estimate, not live data; verify with official {source_name} statistics")
}

/// Records for `topic`, or an empty list when the table has no entry for it.
pub fn lookup(profile: &SourceProfile, country: &Country, topic: &Topic) -> Vec<Record> {
    let label = profile.reference_label();
    let note = reference_note(&profile.name);

    profile
        .reference
        .rows(topic)
        .iter()
        .map(|row| Record {
            indicator: row.indicator.clone(),
            indicator_code: None,
            value: row.value.clone(),
            unit: row.unit.clone(),
            year: row.year.clone(),
            country: country.name.clone(),
            source: label.clone(),
            note: Some(note.clone()),
        })
        .collect()
}
