//! Retry schedule for transient HTTP statuses.

use std::time::Duration;

/// How many additional attempts a transient failure gets, and how long to wait before each.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryPolicy {
    /// Fail on the first transient status.
    None,
    /// Delay `initial * multiplier^attempt`, capped at `max_interval`.
    Exponential {
        /// Retries after the first attempt (not counting it).
        max_retries: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    },
}

impl RetryPolicy {
    pub fn none() -> Self {
        RetryPolicy::None
    }

    pub fn exponential(
        max_retries: usize,
        initial_interval: Duration,
        max_interval: Duration,
        multiplier: f64,
    ) -> Self {
        RetryPolicy::Exponential {
            max_retries,
            initial_interval,
            max_interval,
            multiplier,
        }
    }

    /// `attempt` counts retries already performed (0 before the first retry).
    pub fn should_retry(&self, attempt: usize) -> bool {
        match self {
            RetryPolicy::None => false,
            RetryPolicy::Exponential { max_retries, .. } => attempt < *max_retries,
        }
    }

    pub fn delay(&self, attempt: usize) -> Duration {
        match self {
            RetryPolicy::None => Duration::ZERO,
            RetryPolicy::Exponential {
                initial_interval,
                max_interval,
                multiplier,
                ..
            } => {
                let secs = initial_interval.as_secs_f64() * multiplier.powi(attempt as i32);
                Duration::from_secs_f64(secs).min(*max_interval)
            }
        }
    }

    /// Upper bound applied to server-provided `Retry-After` hints.
    pub fn max_interval(&self) -> Duration {
        match self {
            RetryPolicy::None => Duration::ZERO,
            RetryPolicy::Exponential { max_interval, .. } => *max_interval,
        }
    }
}

impl Default for RetryPolicy {
    /// Two retries, 300ms doubling, capped at 5s.
    fn default() -> Self {
        RetryPolicy::exponential(2, Duration::from_millis(300), Duration::from_secs(5), 2.0)
    }
}
