//! Bounded fixed-delay retries
//!
//! Used around lookups of freshly copied items, which can take a while to show
//! up in listings after the copy returns.

use log::{debug, error, info, warn};
use std::future::Future;
use std::time::Duration;

use crate::config::RetrySettings;
use crate::error::{PromoteError, Result};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 12,
            delay: Duration::from_secs(5),
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            delay: Duration::from_secs(settings.delay_secs),
        }
    }
}

/// Retry policy that re-runs recoverable failures after a fixed delay
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `operation` until it succeeds, fails fatally, or runs out of attempts.
    ///
    /// Fatal errors (see [`PromoteError::is_recoverable`]) are returned as-is
    /// on the attempt they occur. Exhaustion yields
    /// [`PromoteError::RetriesExhausted`] wrapping the last error.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            debug!("Executing operation (attempt {}/{})", attempt, max_attempts);

            match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        info!("Operation succeeded after {} attempts", attempt);
                    }
                    return Ok(result);
                }
                Err(error) if !error.is_recoverable() => {
                    warn!("Operation failed permanently on attempt {}: {}", attempt, error);
                    return Err(error);
                }
                Err(error) => {
                    if attempt < max_attempts {
                        warn!(
                            "Attempt {}/{} failed: {}. Retrying in {}s...",
                            attempt,
                            max_attempts,
                            error,
                            self.config.delay.as_secs_f64()
                        );
                        tokio::time::sleep(self.config.delay).await;
                    } else {
                        warn!("Attempt {}/{} failed: {}", attempt, max_attempts, error);
                    }
                    last_error = Some(error);
                }
            }
        }

        let last = last_error.unwrap_or_else(|| {
            PromoteError::Config("retry loop ran zero attempts".to_string())
        });
        error!("Exhausted retries. Last error: {}", last);
        Err(PromoteError::RetriesExhausted {
            attempts: max_attempts,
            last: Box::new(last),
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
