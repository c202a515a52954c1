//! The `analyze` command: one cancellable pipeline run rendered as it goes.

use std::io::Write;
use std::process::ExitCode;

use barmood_core::{AppConfig, RankingMode};
use barmood_scraper::{random_user_agent, FetcherConfig, PageFetcher};
use barmood_sentiment::{run_analysis, AnalysisError, AnalysisReport, AnalysisSettings, RunEvent};
use clap::Args;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::controller::RunController;
use crate::present::Presenter;

#[derive(Debug, Default, Args)]
pub struct AnalyzeArgs {
    /// Search-results page to start from
    #[arg(long)]
    pub search_url: Option<String>,

    /// Origin that relative listing links are resolved against
    #[arg(long)]
    pub site_origin: Option<String>,

    /// Number of entries in the top summary
    #[arg(long)]
    pub top: Option<usize>,

    /// Rank individual reviews or bars by mean review score
    #[arg(long, value_name = "per-review|per-bar")]
    pub ranking: Option<RankingMode>,

    /// Client identifier sent as User-Agent (random browser UA by default)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Skip the distribution chart
    #[arg(long)]
    pub no_chart: bool,

    /// Print the final report as JSON instead of the text log
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.search_url {
            config.search_url.clone_from(url);
        }
        if let Some(origin) = &self.site_origin {
            config.site_origin = origin.trim_end_matches('/').to_string();
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if let Some(ranking) = self.ranking {
            config.ranking = ranking;
        }
        if let Some(ua) = &self.user_agent {
            config.user_agent = Some(ua.clone());
        }
    }
}

/// Runs one analysis and renders it through `presenter`.
///
/// Analysis failures are reported in the log and mapped to a failing exit
/// code; only output I/O errors and controller failures surface as `Err`.
///
/// # Errors
///
/// Returns an error if writing output fails or the run task panics.
pub(crate) async fn run_analyze<W: Write>(
    mut config: AppConfig,
    args: &AnalyzeArgs,
    presenter: &mut Presenter<W>,
) -> anyhow::Result<ExitCode> {
    args.apply(&mut config);

    // Picked once per invocation and passed down explicitly.
    let user_agent = config.user_agent.clone().unwrap_or_else(random_user_agent);
    let fetcher_config = FetcherConfig {
        user_agent,
        timeout_secs: config.request_timeout_secs,
        max_retries: config.max_retries,
        backoff_base_secs: config.retry_backoff_base_secs,
    };
    let settings = AnalysisSettings::from(&config);

    tracing::info!(
        search_url = %settings.search_url,
        ranking = %settings.ranking,
        user_agent = %fetcher_config.user_agent,
        "starting analysis"
    );

    let controller = RunController::default();
    let (tx, mut rx) = unbounded_channel();
    let handle = controller.start(move |cancel| async move {
        analyze_once(&fetcher_config, &settings, &tx, &cancel).await
    })?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancel_requested = false;

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(event) if !args.json => presenter.event(&event)?,
                Some(_) => {}
                None => break,
            },
            _ = &mut ctrl_c, if !cancel_requested => {
                cancel_requested = true;
                if controller.cancel() {
                    presenter.notice("Cancelling analysis...")?;
                }
            }
        }
    }

    let outcome = handle.join().await?;
    tracing::debug!(state = ?controller.state(), "run task finished");

    match outcome {
        Ok(report) => {
            if args.json {
                presenter.notice(&serde_json::to_string_pretty(&report)?)?;
            } else {
                presenter.report(&report, config.top_n, !args.no_chart)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "analysis failed");
            presenter.failure(&err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn analyze_once(
    fetcher_config: &FetcherConfig,
    settings: &AnalysisSettings,
    events: &UnboundedSender<RunEvent>,
    cancel: &CancellationToken,
) -> Result<AnalysisReport, AnalysisError> {
    let fetcher = PageFetcher::new(fetcher_config)?;
    run_analysis(&fetcher, settings, events, cancel).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AppConfig {
        AppConfig {
            search_url: format!("{}/msk/search/bar-moskvy", server.uri()),
            site_origin: server.uri(),
            user_agent: Some("barmood-test/0.1".to_string()),
            request_timeout_secs: 5,
            ..AppConfig::default()
        }
    }

    async fn mount_site(server: &MockServer) {
        let search = r#"<ul><li class="page-search__item _premium">
              <a href="/msk/place/one">photo</a>
              <div class="search-place-card__title">Bar One</div>
              <div class="search-place-card__about">Cocktails</div>
              <ul><li class="search-place-card__info-item">Arbat 5</li></ul>
            </li></ul>"#;
        let detail = r#"<div class="review__text">Great bar!</div>
            <div class="review__text">Rude staff.</div>"#;

        Mock::given(method("GET"))
            .and(path("/msk/search/bar-moskvy"))
            .and(header("user-agent", "barmood-test/0.1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(search))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/msk/place/one"))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail))
            .mount(server)
            .await;
    }

    #[test]
    fn args_override_config() {
        let mut config = AppConfig::default();
        let args = AnalyzeArgs {
            search_url: Some("http://localhost:9/search".to_string()),
            site_origin: Some("http://localhost:9/".to_string()),
            top: Some(5),
            ranking: Some(RankingMode::PerBar),
            user_agent: Some("custom/1.0".to_string()),
            ..AnalyzeArgs::default()
        };
        args.apply(&mut config);
        assert_eq!(config.search_url, "http://localhost:9/search");
        assert_eq!(config.site_origin, "http://localhost:9");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.ranking, RankingMode::PerBar);
        assert_eq!(config.user_agent.as_deref(), Some("custom/1.0"));
    }

    #[tokio::test]
    async fn analyze_prints_log_top_and_chart() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        let mut presenter = Presenter::new(Vec::new(), false);
        let code = run_analyze(config_for(&server), &AnalyzeArgs::default(), &mut presenter)
            .await
            .unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(text.lines().filter(|l| l.starts_with("Bar: ")).count(), 1);
        assert_eq!(text.lines().filter(|l| l.starts_with("Review: ")).count(), 2);
        assert!(text.contains("Bar: Bar One | Cocktails | Arbat 5 |"), "{text}");
        assert!(text.contains("Top 3 bars by positive sentiment:"), "{text}");
        assert!(text.contains("Positive  50.0% (1)"), "{text}");
        assert!(text.contains("Negative  50.0% (1)"), "{text}");
    }

    #[tokio::test]
    async fn analyze_json_prints_report_only() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        let args = AnalyzeArgs {
            json: true,
            ..AnalyzeArgs::default()
        };
        let mut presenter = Presenter::new(Vec::new(), false);
        let code = run_analyze(config_for(&server), &args, &mut presenter)
            .await
            .unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["reviews"].as_array().unwrap().len(), 2);
        assert_eq!(json["ranking"], "per-review");
        assert_eq!(json["distribution"]["positive"], 1);
    }

    #[tokio::test]
    async fn analyze_reports_fetch_failure_without_crashing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut presenter = Presenter::new(Vec::new(), false);
        let code = run_analyze(config_for(&server), &AnalyzeArgs::default(), &mut presenter)
            .await
            .unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert!(text.contains("Analysis failed: fetch failed: unexpected HTTP status 500"), "{text}");
    }
}
