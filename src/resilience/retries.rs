//! Retry policy and per-item retry state.
//!
//! # Responsibilities
//! - Hold the attempt bound and backoff window parameters
//! - Track attempts for one address and size the sleep before each retry
//!
//! # Design Decisions
//! - One `RetryState` per address; nothing is shared between addresses
//! - The attempt that exhausts the budget is final, whatever its outcome

use std::time::Duration;

use crate::config::RetryConfig;
use crate::resilience::backoff::JitterSource;

/// Immutable retry parameters shared by every call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_factor: u32,
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_factor: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_factor,
            backoff_unit,
        }
    }

    /// Start tracking a fresh call.
    pub fn start(&self) -> RetryState<'_> {
        RetryState {
            policy: self,
            attempt: 1,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.backoff_factor,
            Duration::from_millis(config.backoff_unit_ms),
        )
    }
}

/// Attempt counter for a single call.
#[derive(Debug)]
pub struct RetryState<'a> {
    policy: &'a RetryPolicy,
    attempt: u32,
}

impl RetryState<'_> {
    /// The attempt currently being made, starting at 1.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Whether another attempt is allowed after the current one.
    pub fn can_retry(&self) -> bool {
        self.attempt < self.policy.max_attempts
    }

    /// Draw the delay before the next attempt and advance the counter.
    ///
    /// Returns `None` once the attempt budget is spent.
    pub fn next_delay(&mut self, jitter: &JitterSource) -> Option<Duration> {
        if !self.can_retry() {
            return None;
        }
        let delay = jitter.backoff(
            self.attempt,
            self.policy.backoff_factor,
            self.policy.backoff_unit,
        );
        self.attempt += 1;
        Some(delay)
    }
}
