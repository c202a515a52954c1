//! Text presentation of a run: append-only log, top-N block and chart.

use std::io::{self, Write};

use barmood_core::{ListingRecord, RankingMode, ReviewScore};
use barmood_scraper::ListingParseFailure;
use barmood_sentiment::{AnalysisError, AnalysisReport, RunEvent};

use crate::chart::render_pie;

const CHART_RADIUS: usize = 6;

pub(crate) fn listing_line(listing: &ListingRecord) -> String {
    format!(
        "Bar: {} | {} | {} | {}",
        listing.title, listing.about, listing.location, listing.detail_url
    )
}

pub(crate) fn review_line(review: &ReviewScore) -> String {
    format!("Review: {} | Sentiment: {}", review.text, review.sentiment)
}

pub(crate) fn skipped_line(failure: &ListingParseFailure) -> String {
    format!("Skipped {failure}")
}

pub(crate) fn event_line(event: &RunEvent) -> String {
    match event {
        RunEvent::ListingFound(listing) => listing_line(listing),
        RunEvent::ReviewScored(review) => review_line(review),
        RunEvent::ListingSkipped(failure) => skipped_line(failure),
    }
}

pub(crate) fn top_block(report: &AnalysisReport, n: usize) -> String {
    let mut out = match report.ranking {
        RankingMode::PerReview => format!("Top {n} bars by positive sentiment:\n\n"),
        RankingMode::PerBar => format!("Top {n} bars by average sentiment:\n\n"),
    };
    for (i, entry) in report.top(n).iter().enumerate() {
        let line = match report.ranking {
            RankingMode::PerReview => {
                format!("{}. URL: {} | Sentiment: {:.4}\n", i + 1, entry.url, entry.sentiment)
            }
            RankingMode::PerBar => format!(
                "{}. URL: {} | Sentiment: {:.4} ({} reviews)\n",
                i + 1,
                entry.url,
                entry.sentiment,
                entry.review_count
            ),
        };
        out.push_str(&line);
    }
    out
}

/// Writes run output to `W` in the order it arrives.
pub(crate) struct Presenter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Presenter<W> {
    pub(crate) fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub(crate) fn event(&mut self, event: &RunEvent) -> io::Result<()> {
        writeln!(self.out, "{}", event_line(event))
    }

    pub(crate) fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    pub(crate) fn report(
        &mut self,
        report: &AnalysisReport,
        top_n: usize,
        chart: bool,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", top_block(report, top_n))?;
        if chart {
            writeln!(self.out)?;
            write!(
                self.out,
                "{}",
                render_pie(&report.distribution, CHART_RADIUS, self.color)
            )?;
        }
        self.out.flush()
    }

    pub(crate) fn failure(&mut self, err: &AnalysisError) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Analysis failed: {err}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
