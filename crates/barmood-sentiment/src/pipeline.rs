//! Analysis pipeline orchestration.

use std::time::Duration;

use barmood_core::ReviewScore;
use barmood_scraper::{extract_listings, extract_reviews, ListingParseFailure, PageFetcher};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::error::AnalysisError;
use crate::rank::{rank, SentimentDistribution};
use crate::scorer::compound_score;
use crate::types::{AnalysisReport, AnalysisSettings, RunEvent};

/// Run one full analysis.
///
/// 1. Fetch the search page and extract listing cards.
/// 2. For each listing, in page order: report it, fetch its detail page,
///    extract reviews and score each one.
/// 3. Rank the collected scores and compute the sentiment distribution.
///
/// Fetches are strictly sequential over the single `fetcher` session. Events
/// are sent in page order: a skipped card is reported between the listings
/// around it. A closed receiver does not stop the run.
///
/// # Errors
///
/// - [`AnalysisError::Fetch`]: any page fetch failed; the run stops there.
/// - [`AnalysisError::Parse`]: listing cards matched but none was readable.
/// - [`AnalysisError::EmptyResult`]: no listings, or no reviews at all.
/// - [`AnalysisError::Cancelled`]: `cancel` fired before the run finished.
pub async fn run_analysis(
    fetcher: &PageFetcher,
    settings: &AnalysisSettings,
    events: &UnboundedSender<RunEvent>,
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let search_html = fetch_cancellable(fetcher, &settings.search_url, cancel).await?;
    let extraction = extract_listings(&search_html, &settings.site_origin);

    tracing::info!(
        url = %settings.search_url,
        listings = extraction.records.len(),
        skipped = extraction.failures.len(),
        "search page parsed"
    );

    if extraction.records.is_empty() {
        for failure in &extraction.failures {
            report_skipped(events, failure);
        }
        return Err(if extraction.failures.is_empty() {
            AnalysisError::EmptyResult(format!("no listings found on {}", settings.search_url))
        } else {
            AnalysisError::Parse {
                url: settings.search_url.clone(),
                matched: extraction.matched(),
            }
        });
    }

    let mut reviews: Vec<ReviewScore> = Vec::new();

    // Records and failures partition the matched cards; walk them together
    // so skips are reported at their place in the page.
    let mut failures = extraction.failures.iter().peekable();
    let mut position = 0usize;

    for listing in &extraction.records {
        while let Some(failure) = failures.next_if(|f| f.index == position) {
            report_skipped(events, failure);
            position += 1;
        }
        position += 1;
        emit(events, RunEvent::ListingFound(listing.clone()));

        pause(settings.inter_request_delay_ms, cancel).await?;
        let detail_html = fetch_cancellable(fetcher, &listing.detail_url, cancel).await?;
        let texts = extract_reviews(&detail_html);

        tracing::info!(
            listing = %listing.detail_url,
            reviews = texts.len(),
            "detail page parsed"
        );

        for text in texts {
            let score = ReviewScore {
                source_url: listing.detail_url.clone(),
                sentiment: compound_score(&text),
                text,
            };
            emit(events, RunEvent::ReviewScored(score.clone()));
            reviews.push(score);
        }
    }

    for failure in failures {
        report_skipped(events, failure);
    }

    if reviews.is_empty() {
        return Err(AnalysisError::EmptyResult(format!(
            "no reviews found across {} listings",
            extraction.records.len()
        )));
    }

    let ranked = rank(settings.ranking, &reviews);
    let distribution = SentimentDistribution::from_scores(reviews.iter().map(|r| r.sentiment));

    tracing::info!(
        listings = extraction.records.len(),
        reviews = reviews.len(),
        positive = distribution.positive,
        neutral = distribution.neutral,
        negative = distribution.negative,
        "analysis complete"
    );

    Ok(AnalysisReport {
        skipped_listings: extraction.failures.len(),
        listings: extraction.records,
        reviews,
        ranking: settings.ranking,
        ranked,
        distribution,
    })
}

async fn fetch_cancellable(
    fetcher: &PageFetcher,
    url: &str,
    cancel: &CancellationToken,
) -> Result<String, AnalysisError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AnalysisError::Cancelled),
        result = fetcher.fetch_page(url) => result.map_err(AnalysisError::from),
    }
}

async fn pause(delay_ms: u64, cancel: &CancellationToken) -> Result<(), AnalysisError> {
    if delay_ms == 0 {
        return Ok(());
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AnalysisError::Cancelled),
        () = tokio::time::sleep(Duration::from_millis(delay_ms)) => Ok(()),
    }
}

fn report_skipped(events: &UnboundedSender<RunEvent>, failure: &ListingParseFailure) {
    tracing::warn!(%failure, "listing skipped");
    emit(events, RunEvent::ListingSkipped(failure.clone()));
}

fn emit(events: &UnboundedSender<RunEvent>, event: RunEvent) {
    if events.send(event).is_err() {
        tracing::debug!("event receiver dropped");
    }
}
