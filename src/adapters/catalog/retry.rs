use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::errors::FetchError;

/// Bounded retry with linearly growing delay: `base`, `2 * base`, `3 * base`, ...
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self { max_retries, base_delay }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Run `operation` until it succeeds, fails permanently, or retries run out.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(retries = attempt, "Catalog fetch succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(attempt, ?delay, error = %err, "Catalog fetch failed, retrying");
                    sleep(delay).await;
                }
                Err(err) => {
                    if err.is_retryable() {
                        warn!(attempts = attempt + 1, error = %err, "Catalog fetch retries exhausted");
                    } else {
                        debug!(error = %err, "Permanent catalog error, not retrying");
                    }
                    return Err(err);
                }
            }
        }
    }
}
