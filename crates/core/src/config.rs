//! Tunable parameters for a polling session.

use std::time::Duration;

use crate::status::SessionStatus;

/// Configuration for one polling session.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Fixed cadence between scheduled probe cycles.
    pub poll_interval: Duration,
    /// Maximum total wait before the session is forced to `TimedOut`.
    pub timeout: Duration,
    /// Status the session is constructed with. Anything other than
    /// `Processing` produces an already-terminal session with no timers
    /// armed (useful for tests and replay).
    pub initial_status: SessionStatus,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            timeout: Duration::from_secs(120),
            initial_status: SessionStatus::Processing,
        }
    }
}

impl PollConfig {
    /// Validate the configuration.
    ///
    /// The interval must be non-zero and the timeout must exceed the
    /// interval (a timeout shorter than one tick would fire before the
    /// session ever had a chance to observe readiness twice).
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("poll_interval must be non-zero".to_string());
        }
        if self.timeout <= self.poll_interval {
            return Err(format!(
                "timeout ({:?}) must exceed poll_interval ({:?})",
                self.timeout, self.poll_interval
            ));
        }
        Ok(())
    }
}
