use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::utils::visible_text;
use super::{ExtractContext, Extractor};
use crate::core::Record;

static CANDIDATES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr, p, li, dd, div, h1, h2, h3, h4, h5, h6, span")
        .expect("static candidate selector")
});
static BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p, li, dd, div, h1, h2, h3, h4, h5, h6, table")
        .expect("static block selector")
});

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 200;
const MAX_LABEL_LEN: usize = 80;

/// Table rows and leaf text blocks that carry a number, in document order.
pub(super) fn extract(doc: &Html, ex: &Extractor, ctx: &ExtractContext<'_>) -> Vec<Record> {
    let mut out = Vec::new();

    for el in doc.select(&CANDIDATES) {
        if out.len() >= ex.max_structured {
            break;
        }

        let record = if el.value().name() == "tr" {
            row_record(el, ex, ctx)
        } else if inside_table(el) || !is_leaf_candidate(el) {
            None
        } else {
            text_record(&visible_text(el), ex, ctx)
        };

        if let Some(r) = record {
            out.push(r);
        }
    }

    out
}

/// First two direct cells of a row as label and value.
fn row_record(row: ElementRef<'_>, ex: &Extractor, ctx: &ExtractContext<'_>) -> Option<Record> {
    let mut cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| matches!(c.value().name(), "td" | "th"));
    let label = visible_text(cells.next()?);
    let value = visible_text(cells.next()?);

    if label.chars().count() < MIN_LEN
        || value.chars().count() > MAX_LEN
        || !has_digit(&value)
        || !ex.is_statistic_like(&format!("{label} {value}"), ctx.topic)
    {
        return None;
    }
    Some(Record::new(label, value, ctx.country, ctx.source))
}

/// Free-standing text: split `Label: value`, otherwise keep it whole under a
/// generic indicator name.
fn text_record(text: &str, ex: &Extractor, ctx: &ExtractContext<'_>) -> Option<Record> {
    let len = text.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) || !has_digit(text) {
        return None;
    }
    if !ex.is_statistic_like(text, ctx.topic) {
        return None;
    }

    if let Some((label, value)) = text.split_once(':') {
        let (label, value) = (label.trim(), value.trim());
        if !label.is_empty() && label.chars().count() <= MAX_LABEL_LEN && has_digit(value) {
            return Some(Record::new(label, value, ctx.country, ctx.source));
        }
    }

    let indicator = format!("{} {} Data", ctx.country, ctx.topic.title());
    Some(Record::new(indicator, text, ctx.country, ctx.source))
}

/// Blocks with no nested block; spans only when their enclosing block is
/// not itself a leaf (that block already covers the span's text).
fn is_leaf_candidate(el: ElementRef<'_>) -> bool {
    if el.value().name() == "span" {
        return el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|a| BLOCKS.matches(a))
            .is_none_or(has_block_descendant);
    }
    !has_block_descendant(el)
}

fn has_block_descendant(el: ElementRef<'_>) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|d| BLOCKS.matches(&d))
}

fn inside_table(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| matches!(a.value().name(), "table" | "tr" | "td" | "th"))
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}
