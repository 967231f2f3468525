//! Identifier and timestamp aliases shared across the workspace.

use serde::{Deserialize, Serialize};

/// Documents are addressed by the backend's UUID primary key.
pub type DocumentId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Valid resource kind strings (used in logs and serialized outcomes).
pub const KIND_SUMMARY: &str = "summary";
pub const KIND_CLASSIFICATION: &str = "classification";

/// All valid resource kind strings.
pub const VALID_RESOURCE_KINDS: &[&str] = &[KIND_SUMMARY, KIND_CLASSIFICATION];

/// The two independently-completing sub-resources of a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Summary,
    Classification,
}

impl ResourceKind {
    /// Convert from a string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_SUMMARY => Ok(Self::Summary),
            KIND_CLASSIFICATION => Ok(Self::Classification),
            _ => Err(format!(
                "Invalid resource kind '{s}'. Must be one of: {}",
                VALID_RESOURCE_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the stable string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => KIND_SUMMARY,
            Self::Classification => KIND_CLASSIFICATION,
        }
    }
}
