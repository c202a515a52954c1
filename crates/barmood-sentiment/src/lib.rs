//! Review sentiment scoring, ranking and the end-to-end analysis pipeline.
//!
//! Fetches a bar search page, follows every listing to its detail page,
//! scores each review with a rule-based lexicon model and ranks the results.
//! The pipeline is display-free: progress is reported through [`RunEvent`]s
//! and the outcome is returned as an [`AnalysisReport`].

pub mod error;
pub mod pipeline;
pub mod rank;
pub mod scorer;
pub mod types;

mod lexicon;

pub use error::AnalysisError;
pub use pipeline::run_analysis;
pub use rank::{rank, rank_bars, rank_reviews, top_n, SentimentDistribution};
pub use scorer::compound_score;
pub use types::{AnalysisReport, AnalysisSettings, RankedEntry, RunEvent};
