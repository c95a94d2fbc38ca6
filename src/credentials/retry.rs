//! Bounded retry with exponential backoff

use crate::config::schema::ValidatorConfig;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Errors that know whether another attempt could help
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Multiplier applied to the delay after each retry
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Build a policy from validator settings
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_backoff_ms),
            backoff_multiplier: config.backoff_multiplier.max(1.0),
        }
    }

    /// Policy that makes exactly one attempt
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay before retry number `retry` (0-indexed)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let millis = self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(retry as i32);
        Duration::from_millis(millis as u64)
    }
}

/// Run `operation` until it succeeds, fails terminally, or attempts run out
///
/// The backoff is an async sleep: dropping the returned future during a
/// wait abandons the remaining attempts.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;

                if !e.is_retryable() {
                    debug!(
                        "{}: non-retryable error on attempt {}: {}",
                        operation_name, attempt, e
                    );
                    return Err(e);
                }

                if attempt >= policy.max_attempts {
                    warn!(
                        "{}: giving up after {} attempts: {}",
                        operation_name, attempt, e
                    );
                    return Err(e);
                }

                let delay = policy.delay_for_retry(attempt - 1);
                warn!(
                    "{}: attempt {} failed, retrying in {:?}: {}",
                    operation_name, attempt, delay, e
                );
                sleep(delay).await;
            }
        }
    }
}
