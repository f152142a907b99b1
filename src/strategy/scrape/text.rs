use scraper::Html;

use super::utils::{truncate, visible_text};
use super::{ExtractContext, Extractor};
use crate::core::Record;

const CONTEXT_CHARS: usize = 160;

/// Apply topic-matching patterns to the page's visible text.
///
/// Each pattern contributes at most `max_per_pattern` records named
/// `"{label} {n}"`, with the matched passage kept as the note. Records come
/// back in the order their matches appear on the page.
pub(super) fn extract(doc: &Html, ex: &Extractor, ctx: &ExtractContext<'_>) -> Vec<Record> {
    let text = visible_text(doc.root_element());
    let mut out = Vec::new();

    for pattern in ex.patterns.iter().filter(|p| p.applies_to(ctx.topic)) {
        let hits = pattern
            .regex
            .captures_iter(&text)
            .take(ex.max_per_pattern);

        for (n, caps) in hits.enumerate() {
            let Some(m) = caps.get(0) else {
                continue;
            };
            let whole = m.as_str().trim();
            let captured = caps.get(1).map_or(whole, |g| g.as_str()).trim();
            if captured.is_empty() {
                continue;
            }

            let mut record = Record::new(
                format!("{} {}", pattern.label, n + 1),
                format!("{}{captured}", pattern.value_prefix),
                ctx.country,
                ctx.source,
            )
            .with_note(truncate(whole, CONTEXT_CHARS));
            if let Some(unit) = &pattern.unit {
                record = record.with_unit(unit.clone());
            }
            out.push((m.start(), record));
        }
    }

    out.sort_by_key(|(start, _)| *start);
    out.into_iter().map(|(_, record)| record).collect()
}
