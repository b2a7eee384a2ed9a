//! Exponential backoff for transient fetch failures.

use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::{FetchError, Result};

/// How many times to try and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1 << exponent)
    }

    /// Runs `operation`, sleeping with [`thread::sleep`] between attempts.
    pub fn run<T>(&self, operation: impl FnMut(u32) -> Result<T>) -> Result<T> {
        self.run_with_sleep(operation, thread::sleep)
    }

    /// Runs `operation` with an injected sleeper.
    ///
    /// Non-retryable errors return immediately. Once attempts run out the
    /// last error is wrapped in [`FetchError::Exhausted`].
    pub fn run_with_sleep<T>(
        &self,
        mut operation: impl FnMut(u32) -> Result<T>,
        mut sleep: impl FnMut(Duration),
    ) -> Result<T> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= attempts => {
                    return Err(FetchError::Exhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(attempt, delay_ms = delay.as_millis(), error = %err, "fetch failed, retrying");
                    sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}
