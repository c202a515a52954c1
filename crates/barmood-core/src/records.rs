use serde::{Deserialize, Serialize};

/// One bar entry extracted from a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    /// Short description shown under the title.
    pub about: String,
    /// First info item of the card (usually the address or metro station).
    pub location: String,
    /// Absolute URL of the bar's detail page.
    pub detail_url: String,
}

/// A scored review, tagged with the detail page it came from.
///
/// `source_url` always equals the `detail_url` of the listing whose
/// page produced the review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewScore {
    pub source_url: String,
    pub text: String,
    /// Compound score in `[-1.0, 1.0]`.
    pub sentiment: f64,
}

/// How results are ranked for the top-N summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMode {
    /// Every review is ranked on its own score.
    #[default]
    PerReview,
    /// Reviews are grouped by bar and ranked on the bar's mean score.
    PerBar,
}

impl RankingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RankingMode::PerReview => "per-review",
            RankingMode::PerBar => "per-bar",
        }
    }
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-review" | "review" => Ok(RankingMode::PerReview),
            "per-bar" | "bar" => Ok(RankingMode::PerBar),
            other => Err(format!(
                "unknown ranking mode \"{other}\" (expected per-review or per-bar)"
            )),
        }
    }
}
