//! Backoff policy for transient fetch failures.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a server-requested `Retry-After` wait.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// How many extra attempts a fetch gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    /// Network failures, 429 and 5xx may clear up on their own; a missing
    /// page or a bad URL will not.
    fn is_transient(err: &ScraperError) -> bool {
        match err {
            ScraperError::Http(_) | ScraperError::RateLimited { .. } => true,
            ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
            ScraperError::NotFound { .. } | ScraperError::InvalidUrl { .. } => false,
        }
    }

    /// Wait before retry number `retry` (zero-based).
    ///
    /// Doubles from `backoff_base_secs`. A 429 waits at least as long as the
    /// server asked for, capped at [`MAX_RETRY_AFTER_SECS`].
    fn delay(&self, retry: u32, err: &ScraperError) -> Duration {
        let backoff = self
            .backoff_base_secs
            .saturating_mul(1u64 << retry.min(62));
        let secs = match err {
            ScraperError::RateLimited {
                retry_after_secs, ..
            } => backoff.max((*retry_after_secs).min(MAX_RETRY_AFTER_SECS)),
            _ => backoff,
        };
        Duration::from_secs(secs)
    }

    /// Runs `attempt` until it succeeds, fails permanently or the retry
    /// budget is spent. The last error is returned in the latter two cases.
    pub(crate) async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScraperError>>,
    {
        let mut retry = 0u32;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if retry < self.max_retries && Self::is_transient(&err) => {
                    let wait = self.delay(retry, &err);
                    tracing::warn!(
                        retry = retry + 1,
                        max_retries = self.max_retries,
                        wait_secs = wait.as_secs(),
                        error = %err,
                        "page fetch failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
