use barmood_scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ScraperError),

    #[error("could not read any of the {matched} listings on {url}")]
    Parse { url: String, matched: usize },

    #[error("no results: {0}")]
    EmptyResult(String),

    #[error("analysis cancelled")]
    Cancelled,
}
