//! Pacing
//!
//! Fixed delays that keep a sequential run under the service's rate limit:
//! one pause after every submitted cell, one before re-sending a rate-limited
//! request.

use std::time::Duration;

pub const DEFAULT_CELL_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// How a rate-limited request is retried.
///
/// The delay never grows. `max_retries: None` retries forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self { delay, max_retries: None }
    }

    pub fn bounded(delay: Duration, max_retries: u32) -> Self {
        Self { delay, max_retries: Some(max_retries) }
    }

    /// Whether another attempt is allowed after `retries` retries already happened
    pub fn allows_retry(&self, retries: u32) -> bool {
        match self.max_retries {
            Some(max) => retries < max,
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(DEFAULT_RETRY_DELAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after each cell that produced a request
    pub cell_delay: Duration,
    pub retry: RetryPolicy,
}

impl Pacing {
    /// No pauses at all; used by tests and dry environments
    pub fn immediate() -> Self {
        Self {
            cell_delay: Duration::ZERO,
            retry: RetryPolicy::unbounded(Duration::ZERO),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = Some(max_retries);
        self
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            cell_delay: DEFAULT_CELL_DELAY,
            retry: RetryPolicy::default(),
        }
    }
}

/// Sleep for `delay`, skipping the timer entirely for a zero duration
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
