//! Ranking and distribution over scored reviews.

use barmood_core::{RankingMode, ReviewScore};
use serde::Serialize;

use crate::types::RankedEntry;

/// Ranks according to `mode`.
#[must_use]
pub fn rank(mode: RankingMode, scores: &[ReviewScore]) -> Vec<RankedEntry> {
    match mode {
        RankingMode::PerReview => rank_reviews(scores),
        RankingMode::PerBar => rank_bars(scores),
    }
}

/// Ranks every review on its own score, best first.
///
/// The sort is stable, so ties keep collection order.
#[must_use]
pub fn rank_reviews(scores: &[ReviewScore]) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = scores
        .iter()
        .map(|s| RankedEntry {
            url: s.source_url.clone(),
            sentiment: s.sentiment,
            review_count: 1,
        })
        .collect();
    sort_descending(&mut entries);
    entries
}

/// Groups reviews by bar and ranks bars on their mean score, best first.
///
/// Bars with equal means keep the order in which they were first seen.
#[must_use]
pub fn rank_bars(scores: &[ReviewScore]) -> Vec<RankedEntry> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    for score in scores {
        match groups.iter_mut().find(|(url, _, _)| *url == score.source_url) {
            Some((_, sum, count)) => {
                *sum += score.sentiment;
                *count += 1;
            }
            None => groups.push((score.source_url.clone(), score.sentiment, 1)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let mut entries: Vec<RankedEntry> = groups
        .into_iter()
        .map(|(url, sum, count)| RankedEntry {
            url,
            sentiment: sum / count as f64,
            review_count: count,
        })
        .collect();
    sort_descending(&mut entries);
    entries
}

/// The first `n` entries, never more than `entries.len()`.
#[must_use]
pub fn top_n(entries: &[RankedEntry], n: usize) -> &[RankedEntry] {
    &entries[..n.min(entries.len())]
}

fn sort_descending(entries: &mut [RankedEntry]) {
    entries.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment));
}

/// Counts of positive, neutral and negative scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    /// Scores strictly above zero.
    pub positive: usize,
    /// Scores exactly zero.
    pub neutral: usize,
    /// Scores strictly below zero.
    pub negative: usize,
}

impl SentimentDistribution {
    #[must_use]
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut dist = Self::default();
        for s in scores {
            if s > 0.0 {
                dist.positive += 1;
            } else if s < 0.0 {
                dist.negative += 1;
            } else {
                dist.neutral += 1;
            }
        }
        dist
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    #[must_use]
    pub fn positive_pct(&self) -> f64 {
        self.pct(self.positive)
    }

    #[must_use]
    pub fn neutral_pct(&self) -> f64 {
        self.pct(self.neutral)
    }

    #[must_use]
    pub fn negative_pct(&self) -> f64 {
        self.pct(self.negative)
    }

    /// Share of `count` in percent; `0.0` for an empty distribution.
    #[allow(clippy::cast_precision_loss)]
    fn pct(&self, count: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64 * 100.0,
        }
    }
}
