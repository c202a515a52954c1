//! Detail-page review extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::parse_helpers::{selector, trimmed_text};

static REVIEW_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("div.review__text"));

/// Returns the text of every review block on a bar's detail page.
///
/// Only reviews present in the initial page load are returned; paginated
/// review lists are not followed. Output count always equals the number of
/// review blocks, including blocks with empty text.
#[must_use]
pub fn extract_reviews(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document.select(&REVIEW_TEXT).map(trimmed_text).collect()
}
