//! Poller configuration.

use std::time::Duration;

/// Poller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Delay between status requests
    pub interval: Duration,
    /// Consecutive transient failures tolerated before giving up.
    /// `None` keeps polling through any number of them. Zero is not a cap.
    pub max_consecutive_failures: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_consecutive_failures: None,
        }
    }
}

impl PollerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            interval: Duration::from_millis(
                std::env::var("VGEN_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(2000),
            ),
            max_consecutive_failures: std::env::var("VGEN_POLL_MAX_FAILURES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|max| *max > 0),
        }
    }

    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Cap consecutive transient failures. Zero removes the cap.
    pub fn with_max_consecutive_failures(mut self, max: u32) -> Self {
        self.max_consecutive_failures = Some(max).filter(|max| *max > 0);
        self
    }
}
