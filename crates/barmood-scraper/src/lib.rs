pub mod client;
pub mod error;
pub mod listing;
pub mod review;
pub mod urls;
pub mod user_agent;

mod parse_helpers;
mod retry;

pub use client::{FetcherConfig, PageFetcher};
pub use error::ScraperError;
pub use listing::{extract_listings, ListingExtraction, ListingField, ListingParseFailure};
pub use review::extract_reviews;
pub use user_agent::random_user_agent;
