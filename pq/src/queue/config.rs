//! Queue configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Paced queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Minimum spacing between successive task starts, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    debug!("default_interval_ms: called");
    crate::DEFAULT_INTERVAL_MS
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl QueueConfig {
    /// Create a config with the given interval, rounded up to whole milliseconds
    pub fn with_interval(interval: Duration) -> Self {
        let interval_ms = u64::try_from(interval.as_micros().div_ceil(1000)).unwrap_or(u64::MAX);
        Self { interval_ms }
    }

    /// Get the pacing interval as a Duration
    pub fn interval(&self) -> Duration {
        debug!(interval_ms = %self.interval_ms, "QueueConfig::interval: called");
        Duration::from_millis(self.interval_ms)
    }
}
