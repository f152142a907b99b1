use scraper::ElementRef;

const HIDDEN: [&str; 4] = ["script", "style", "noscript", "template"];

/// Collapse every whitespace run to one space and trim.
pub(super) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text under an element, whitespace-normalized.
///
/// Text nodes inside `script`, `style`, `noscript` and `template` are dropped.
pub(super) fn visible_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN.contains(&e.name()))
        });
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }
    normalize_ws(&out)
}

/// Cut at `max` chars (on a char boundary) and mark the cut.
pub(super) fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
