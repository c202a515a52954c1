//! HTTP page fetcher shared by one analysis run.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;
use crate::retry::RetryPolicy;
use crate::urls::extract_domain;

/// Settings for one [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Client identifier sent as `User-Agent` on every request.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

/// Fetches HTML pages over one pooled `reqwest::Client`.
///
/// The client is the run's network session: it is created when the run
/// starts and released when the fetcher is dropped.
pub struct PageFetcher {
    client: Client,
    user_agent: String,
    retry: RetryPolicy,
}

impl PageFetcher {
    /// Creates a fetcher with the configured timeout, user agent and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &FetcherConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_base_secs: config.backoff_base_secs,
            },
        })
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// The body is decoded using the charset from `Content-Type`, replacing
    /// invalid sequences.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: `url` is not an absolute http(s) URL.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, timeout or TLS failure after all retries.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = Self::validate_url(url)?;

        self.retry.run(|| {
            let parsed = parsed.clone();
            async move {
                let response = self
                    .client
                    .get(parsed.clone())
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en;q=0.8")
                    .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        domain: extract_domain(parsed.as_str()),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: parsed.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: parsed.to_string(),
                    });
                }

                let body = response.text().await?;
                tracing::debug!(url = %parsed, bytes = body.len(), "fetched page");
                Ok(body)
            }
        })
        .await
    }

    fn validate_url(url: &str) -> Result<Url, ScraperError> {
        let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
