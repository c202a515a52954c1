use barmood_core::{AppConfig, ListingRecord, RankingMode, ReviewScore};
use barmood_scraper::ListingParseFailure;
use serde::Serialize;

use crate::rank::SentimentDistribution;

/// One row of the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Detail page of the bar the score belongs to.
    pub url: String,
    /// Review score (per-review mode) or mean review score (per-bar mode).
    pub sentiment: f64,
    /// Reviews behind this row; always 1 in per-review mode.
    pub review_count: usize,
}

/// Progress reported while a run is in flight, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    ListingFound(ListingRecord),
    ListingSkipped(ListingParseFailure),
    ReviewScored(ReviewScore),
}

/// Inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub search_url: String,
    pub site_origin: String,
    pub ranking: RankingMode,
    pub inter_request_delay_ms: u64,
}

impl From<&AppConfig> for AnalysisSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            search_url: config.search_url.clone(),
            site_origin: config.site_origin.clone(),
            ranking: config.ranking,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub listings: Vec<ListingRecord>,
    pub reviews: Vec<ReviewScore>,
    pub ranking: RankingMode,
    /// Full ranking, best first.
    pub ranked: Vec<RankedEntry>,
    pub distribution: SentimentDistribution,
    pub skipped_listings: usize,
}

impl AnalysisReport {
    /// The best `n` ranking rows (fewer if the ranking is shorter).
    #[must_use]
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        crate::rank::top_n(&self.ranked, n)
    }
}
