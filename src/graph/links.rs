// src/graph/links.rs
//! Link markup extraction.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Drops a trailing `#Section` anchor.
#[must_use]
pub fn strip_section(title: &str) -> &str {
    match title.find('#') {
        Some(i) => &title[..i],
        None => title,
    }
}

/// Yields the target title of every `[[Target]]` / `[[Target|Label]]` link
/// in `text`, anchors stripped, in order of appearance.
pub fn link_targets(text: &str) -> impl Iterator<Item = &str> {
    LINK_RE.captures_iter(text).filter_map(|caps| {
        let inner = caps.get(1)?.as_str();
        let target = inner.split('|').next().unwrap_or(inner);
        Some(strip_section(target))
    })
}
