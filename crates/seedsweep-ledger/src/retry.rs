//! Bounded retry with linear backoff.
//!
//! Extracted from the query path so the policy can be configured and tested
//! on its own. Only transient failures are retried; fatal ones surface
//! immediately.

use crate::error::{LedgerError, Result};
use std::future::Future;
use std::time::Duration;

/// Retry policy for transient ledger failures.
///
/// Attempt N (1-based) that fails transiently sleeps `base_delay * N` before
/// the next try. Exhausting all attempts surfaces the last transient error.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given bound and base delay.
    ///
    /// A zero `max_attempts` is clamped to one: every query runs at least
    /// once.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Maximum attempts per operation, including the first.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op` until it succeeds, fails fatally, or the bound is reached.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    if attempt < self.max_attempts {
                        let delay = self.base_delay * attempt;
                        tracing::warn!(
                            "transient failure (attempt {}/{}), retrying in {:?}: {}",
                            attempt,
                            self.max_attempts,
                            delay,
                            err
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error
            .unwrap_or_else(|| LedgerError::Transient("retries exhausted".to_string())))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
