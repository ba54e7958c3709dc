//! Escalating backoff for failed category fetches
//!
//! The wait starts at the configured initial delay and grows by a fixed
//! step after every consecutive failure. There is no cap and no retry
//! limit. One `Backoff` lives for the attempts on a single category.

use crate::config::BackoffConfig;
use std::time::Duration;

/// Linear backoff state for one category
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    step: Duration,
    attempts: u64,
}

impl Backoff {
    /// Creates backoff state from configuration
    pub fn new(config: &BackoffConfig) -> Self {
        Self::from_durations(
            Duration::from_secs(config.initial_secs),
            Duration::from_secs(config.step_secs),
        )
    }

    /// Creates backoff state from explicit durations
    pub fn from_durations(initial: Duration, step: Duration) -> Self {
        Self {
            next: initial,
            step,
            attempts: 0,
        }
    }

    /// Returns the delay to wait now and escalates the next one
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = self.next.saturating_add(self.step);
        self.attempts += 1;
        delay
    }

    /// Number of delays handed out so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}
