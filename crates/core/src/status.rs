//! Session status state machine values.
//!
//! A session starts `Processing` and can only move to one of the two
//! terminal states. Transient per-probe failures never appear here; they
//! are carried separately on an otherwise-`Processing` session.

use serde::{Deserialize, Serialize};

/// Valid session status strings.
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETE: &str = "complete";
pub const STATUS_TIMEOUT: &str = "timeout";

/// All valid session status strings.
pub const VALID_SESSION_STATUSES: &[&str] =
    &[STATUS_PROCESSING, STATUS_COMPLETE, STATUS_TIMEOUT];

/// Overall status of a polling session.
///
/// `Processing` is the only non-terminal state. Once a session reaches
/// `Complete` or `TimedOut` it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Processing,
    Complete,
    #[serde(rename = "timeout")]
    TimedOut,
}

impl SessionStatus {
    /// Convert from a string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PROCESSING => Ok(Self::Processing),
            STATUS_COMPLETE => Ok(Self::Complete),
            STATUS_TIMEOUT => Ok(Self::TimedOut),
            _ => Err(format!(
                "Invalid session status '{s}'. Must be one of: {}",
                VALID_SESSION_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the stable string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => STATUS_PROCESSING,
            Self::Complete => STATUS_COMPLETE,
            Self::TimedOut => STATUS_TIMEOUT,
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_str_processing() {
        assert_eq!(
            SessionStatus::from_str_value("processing").unwrap(),
            SessionStatus::Processing
        );
    }

    #[test]
    fn status_from_str_complete() {
        assert_eq!(
            SessionStatus::from_str_value("complete").unwrap(),
            SessionStatus::Complete
        );
    }

    #[test]
    fn status_from_str_timeout() {
        assert_eq!(
            SessionStatus::from_str_value("timeout").unwrap(),
            SessionStatus::TimedOut
        );
    }

    #[test]
    fn status_from_str_invalid() {
        let result = SessionStatus::from_str_value("failed");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid session status"));
    }

    #[test]
    fn status_as_str_round_trip() {
        for status in &[
            SessionStatus::Processing,
            SessionStatus::Complete,
            SessionStatus::TimedOut,
        ] {
            assert_eq!(
                SessionStatus::from_str_value(status.as_str()).unwrap(),
                *status
            );
        }
    }

    #[test]
    fn processing_is_not_terminal() {
        assert!(!SessionStatus::Processing.is_terminal());
    }

    #[test]
    fn complete_and_timeout_are_terminal() {
        assert!(SessionStatus::Complete.is_terminal());
        assert!(SessionStatus::TimedOut.is_terminal());
    }

    #[test]
    fn serde_uses_snake_case_strings() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::TimedOut).unwrap(),
            "\"timeout\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Processing).unwrap(),
            "\"processing\""
        );
    }
}
