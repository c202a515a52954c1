//! Small helpers shared by the listing and review extractors.

use scraper::{ElementRef, Selector};

/// Builds a static CSS selector.
///
/// Only called with literal selectors, so a parse failure is a programming
/// error.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid static selector")
}

/// Concatenated text of `element` with surrounding whitespace removed.
pub(crate) fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of `element` with every whitespace run collapsed to one space.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first descendant of `parent` matching `sel`, if any.
pub(crate) fn first_text(parent: ElementRef<'_>, sel: &Selector) -> Option<String> {
    parent.select(sel).next().map(collapsed_text)
}
