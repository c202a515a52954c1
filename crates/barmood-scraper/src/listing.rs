//! Search-results page extraction.
//!
//! Every premium listing card on the page becomes one [`ListingRecord`].
//! Cards missing a required field are reported as [`ListingParseFailure`]s
//! instead of aborting the whole page, so a partial layout change still
//! yields whatever cards remain readable.

use std::sync::LazyLock;

use barmood_core::ListingRecord;
use scraper::{Html, Selector};

use crate::parse_helpers::{first_text, selector};
use crate::urls::resolve_detail_url;

static LISTING_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector("li.page-search__item._premium"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("div.search-place-card__title"));
static ABOUT: LazyLock<Selector> = LazyLock::new(|| selector("div.search-place-card__about"));
static LOCATION: LazyLock<Selector> =
    LazyLock::new(|| selector("li.search-place-card__info-item"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// A field a listing card must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Title,
    About,
    Location,
    DetailUrl,
}

impl ListingField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ListingField::Title => "title",
            ListingField::About => "about",
            ListingField::Location => "location",
            ListingField::DetailUrl => "detail link",
        }
    }
}

impl std::fmt::Display for ListingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing card that matched the marker but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParseFailure {
    /// Zero-based position of the card among all matched cards.
    pub index: usize,
    pub missing: Vec<ListingField>,
}

impl std::fmt::Display for ListingParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.missing.iter().map(|m| m.as_str()).collect();
        write!(f, "listing #{}: missing {}", self.index + 1, fields.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingExtraction {
    /// Fully-formed records in document order.
    pub records: Vec<ListingRecord>,
    pub failures: Vec<ListingParseFailure>,
}

impl ListingExtraction {
    /// Number of cards that matched the listing marker.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Extracts every premium listing card from a search-results page.
///
/// Title and about text have whitespace runs collapsed; location is the
/// first info item of the card; the detail link is the first anchor's
/// `href`, resolved against `site_origin`.
#[must_use]
pub fn extract_listings(html: &str, site_origin: &str) -> ListingExtraction {
    let document = Html::parse_document(html);
    let mut extraction = ListingExtraction::default();

    for (index, item) in document.select(&LISTING_ITEM).enumerate() {
        let title = first_text(item, &TITLE).filter(|t| !t.is_empty());
        let about = first_text(item, &ABOUT);
        let location = first_text(item, &LOCATION);
        let detail_url = item
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_detail_url(href, site_origin));

        match (title, about, location, detail_url) {
            (Some(title), Some(about), Some(location), Some(detail_url)) => {
                extraction.records.push(ListingRecord {
                    title,
                    about,
                    location,
                    detail_url,
                });
            }
            (title, about, location, detail_url) => {
                let missing = [
                    (title.is_none(), ListingField::Title),
                    (about.is_none(), ListingField::About),
                    (location.is_none(), ListingField::Location),
                    (detail_url.is_none(), ListingField::DetailUrl),
                ]
                .into_iter()
                .filter_map(|(absent, field)| absent.then_some(field))
                .collect();

                let failure = ListingParseFailure { index, missing };
                tracing::debug!(%failure, "skipping unreadable listing card");
                extraction.failures.push(failure);
            }
        }
    }

    extraction
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
