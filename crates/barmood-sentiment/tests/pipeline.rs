//! End-to-end tests for `run_analysis` against a local `wiremock` site.

use barmood_core::RankingMode;
use barmood_scraper::{FetcherConfig, PageFetcher, ScraperError};
use barmood_sentiment::{
    compound_score, run_analysis, AnalysisError, AnalysisReport, AnalysisSettings, RunEvent,
};
use tokio::sync::mpsc::unbounded_channel;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BAR_ONE_REVIEWS: [&str; 3] = [
    "Great cocktails and very friendly staff!",
    "The music was too loud but the bartender was nice.",
    "Terrible service, we waited forever.",
];

const BAR_TWO_REVIEWS: [&str; 3] = [
    "Cozy place, I love it.",
    "Nothing special.",
    "The worst beer I have ever had.",
];

fn listing_card(title: &str, href: &str) -> String {
    format!(
        r#"<li class="page-search__item _premium">
             <a href="{href}">photo</a>
             <div class="search-place-card__title">{title}</div>
             <div class="search-place-card__about">Bar, cocktails</div>
             <ul><li class="search-place-card__info-item">Tverskaya 1</li></ul>
           </li>"#
    )
}

fn search_page(cards: &[String]) -> String {
    format!(
        "<html><body><ul>{}</ul></body></html>",
        cards.join("\n")
    )
}

fn detail_page(reviews: &[&str]) -> String {
    let blocks: String = reviews
        .iter()
        .map(|r| format!(r#"<div class="review"><div class="review__text">  {r}  </div></div>"#))
        .collect();
    format!("<html><body>{blocks}</body></html>")
}

fn test_fetcher() -> PageFetcher {
    PageFetcher::new(&FetcherConfig {
        user_agent: "barmood-test/0.1".to_string(),
        timeout_secs: 5,
        max_retries: 0,
        backoff_base_secs: 0,
    })
    .expect("failed to build test PageFetcher")
}

fn settings(server: &MockServer, ranking: RankingMode) -> AnalysisSettings {
    AnalysisSettings {
        search_url: format!("{}/msk/search/bar-moskvy", server.uri()),
        site_origin: server.uri(),
        ranking,
        inter_request_delay_ms: 0,
    }
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_two_bar_site(server: &MockServer) {
    mount_page(
        server,
        "/msk/search/bar-moskvy",
        search_page(&[
            listing_card("Bar One", "/msk/place/bar-one"),
            listing_card("Bar Two", "/msk/place/bar-two"),
        ]),
    )
    .await;
    mount_page(server, "/msk/place/bar-one", detail_page(&BAR_ONE_REVIEWS)).await;
    mount_page(server, "/msk/place/bar-two", detail_page(&BAR_TWO_REVIEWS)).await;
}

async fn run(
    server: &MockServer,
    ranking: RankingMode,
) -> (Result<AnalysisReport, AnalysisError>, Vec<RunEvent>) {
    let (tx, mut rx) = unbounded_channel();
    let result = run_analysis(
        &test_fetcher(),
        &settings(server, ranking),
        &tx,
        &CancellationToken::new(),
    )
    .await;
    drop(tx);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    (result, events)
}

#[tokio::test]
async fn two_bars_six_reviews_end_to_end() {
    let server = MockServer::start().await;
    mount_two_bar_site(&server).await;

    let (result, events) = run(&server, RankingMode::PerReview).await;
    let report = result.expect("analysis should succeed");

    // Events: listing, its three reviews, next listing, its three reviews.
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            RunEvent::ListingFound(_) => "listing",
            RunEvent::ReviewScored(_) => "review",
            RunEvent::ListingSkipped(_) => "skipped",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "listing", "review", "review", "review", "listing", "review", "review", "review"
        ]
    );

    let bar_one_url = format!("{}/msk/place/bar-one", server.uri());
    let bar_two_url = format!("{}/msk/place/bar-two", server.uri());
    let review_texts: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            RunEvent::ReviewScored(r) => Some(r.text.as_str()),
            _ => None,
        })
        .collect();
    let expected_texts: Vec<&str> = BAR_ONE_REVIEWS
        .iter()
        .chain(BAR_TWO_REVIEWS.iter())
        .copied()
        .collect();
    assert_eq!(review_texts, expected_texts);

    // Every review is tagged with the detail page that produced it.
    for review in &report.reviews[..3] {
        assert_eq!(review.source_url, bar_one_url);
    }
    for review in &report.reviews[3..] {
        assert_eq!(review.source_url, bar_two_url);
    }

    // Top 3 equals the 3 highest of the 6 known scores, descending.
    let mut expected: Vec<f64> = expected_texts.iter().map(|t| compound_score(t)).collect();
    expected.sort_by(|a, b| b.total_cmp(a));
    let top: Vec<f64> = report.top(3).iter().map(|e| e.sentiment).collect();
    assert_eq!(top, expected[..3].to_vec());

    assert_eq!(report.listings.len(), 2);
    assert_eq!(report.reviews.len(), 6);
    assert_eq!(report.distribution.total(), 6);
    assert_eq!(report.skipped_listings, 0);
}

#[tokio::test]
async fn per_bar_mode_ranks_bars_by_mean() {
    let server = MockServer::start().await;
    mount_two_bar_site(&server).await;

    let (result, _) = run(&server, RankingMode::PerBar).await;
    let report = result.expect("analysis should succeed");

    assert_eq!(report.ranking, RankingMode::PerBar);
    assert_eq!(report.ranked.len(), 2);
    assert!(report.ranked.iter().all(|e| e.review_count == 3));
    assert!(report.ranked[0].sentiment >= report.ranked[1].sentiment);

    let mean = |texts: &[&str]| texts.iter().map(|t| compound_score(t)).sum::<f64>() / 3.0;
    let bar_one_mean = mean(&BAR_ONE_REVIEWS);
    let ranked_one = report
        .ranked
        .iter()
        .find(|e| e.url.ends_with("/msk/place/bar-one"))
        .expect("bar one ranked");
    assert!((ranked_one.sentiment - bar_one_mean).abs() < 1e-9);
}

#[tokio::test]
async fn search_page_failure_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (result, events) = run(&server, RankingMode::PerReview).await;

    assert!(
        matches!(
            result,
            Err(AnalysisError::Fetch(ScraperError::UnexpectedStatus { status: 503, .. }))
        ),
        "expected fetch error, got: {result:?}"
    );
    assert!(events.is_empty());
}

#[tokio::test]
async fn detail_page_failure_stops_the_run() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/msk/search/bar-moskvy",
        search_page(&[
            listing_card("Gone", "/msk/place/gone"),
            listing_card("Never fetched", "/msk/place/never"),
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/msk/place/never"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page(&["good"])))
        .expect(0)
        .mount(&server)
        .await;

    let (result, events) = run(&server, RankingMode::PerReview).await;

    assert!(
        matches!(result, Err(AnalysisError::Fetch(ScraperError::NotFound { .. }))),
        "expected NotFound, got: {result:?}"
    );
    assert_eq!(events.len(), 1, "only the first listing is reported");
}

#[tokio::test]
async fn page_without_listings_is_an_empty_result() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/msk/search/bar-moskvy",
        "<html><body>Nothing found</body></html>".to_string(),
    )
    .await;

    let (result, _) = run(&server, RankingMode::PerReview).await;

    assert!(
        matches!(result, Err(AnalysisError::EmptyResult(_))),
        "expected EmptyResult, got: {result:?}"
    );
}

#[tokio::test]
async fn unreadable_listings_are_a_parse_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/msk/search/bar-moskvy",
        search_page(&[
            r#"<li class="page-search__item _premium"><div>layout changed</div></li>"#.to_string(),
        ]),
    )
    .await;

    let (result, events) = run(&server, RankingMode::PerReview).await;

    assert!(
        matches!(result, Err(AnalysisError::Parse { matched: 1, .. })),
        "expected Parse error, got: {result:?}"
    );
    assert!(matches!(events.as_slice(), [RunEvent::ListingSkipped(_)]));
}

#[tokio::test]
async fn listings_without_reviews_are_an_empty_result() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/msk/search/bar-moskvy",
        search_page(&[listing_card("Quiet", "/msk/place/quiet")]),
    )
    .await;
    mount_page(&server, "/msk/place/quiet", detail_page(&[])).await;

    let (result, events) = run(&server, RankingMode::PerReview).await;

    assert!(
        matches!(result, Err(AnalysisError::EmptyResult(ref msg)) if msg.contains("no reviews")),
        "expected EmptyResult, got: {result:?}"
    );
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn cancelled_token_stops_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let (tx, _rx) = unbounded_channel();
    let result = run_analysis(
        &test_fetcher(),
        &settings(&server, RankingMode::PerReview),
        &tx,
        &cancel,
    )
    .await;

    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[tokio::test]
async fn skipped_cards_are_reported_in_page_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/msk/search/bar-moskvy",
        search_page(&[
            listing_card("Bar One", "/msk/place/bar-one"),
            r#"<li class="page-search__item _premium"><div>layout changed</div></li>"#.to_string(),
            listing_card("Bar Two", "/msk/place/bar-two"),
        ]),
    )
    .await;
    mount_page(&server, "/msk/place/bar-one", detail_page(&["Lovely."])).await;
    mount_page(&server, "/msk/place/bar-two", detail_page(&["Awful."])).await;

    let (result, events) = run(&server, RankingMode::PerReview).await;
    let report = result.expect("analysis should succeed");
    assert_eq!(report.skipped_listings, 1);

    let lines: Vec<String> = events
        .iter()
        .map(|e| match e {
            RunEvent::ListingFound(l) => format!("listing {}", l.title),
            RunEvent::ReviewScored(r) => format!("review {}", r.text),
            RunEvent::ListingSkipped(f) => format!("skipped #{}", f.index + 1),
        })
        .collect();
    assert_eq!(
        lines,
        vec![
            "listing Bar One",
            "review Lovely.",
            "skipped #2",
            "listing Bar Two",
            "review Awful.",
        ]
    );
}
