//! Probe outcomes and the prober seam.
//!
//! A [`ProbeOutcome`] is produced fresh on every check of a sub-resource
//! and never mutated afterwards; a later outcome supersedes it on the
//! session. The [`Prober`] trait is implemented over HTTP in
//! `docpulse-client` and by scripted fakes in tests.

use serde::{Deserialize, Serialize};

use crate::payload::ProbePayload;
use crate::types::{DocumentId, ResourceKind};

/// Result of one readiness check against a single sub-resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Which sub-resource was probed.
    pub kind: ResourceKind,
    /// Whether the sub-resource is ready.
    pub ready: bool,
    /// The payload, present iff `ready`.
    pub payload: Option<ProbePayload>,
    /// Failure reason for a probe that could not confirm readiness.
    ///
    /// A plain "not there yet" (backend 404) carries no failure; only
    /// transport errors, unexpected statuses, and malformed payloads do.
    pub failure: Option<String>,
}

impl ProbeOutcome {
    /// A ready outcome carrying the sub-resource payload.
    pub fn ready(kind: ResourceKind, payload: ProbePayload) -> Self {
        Self {
            kind,
            ready: true,
            payload: Some(payload),
            failure: None,
        }
    }

    /// A not-ready outcome with no error (the resource simply does not
    /// exist yet).
    pub fn pending(kind: ResourceKind) -> Self {
        Self {
            kind,
            ready: false,
            payload: None,
            failure: None,
        }
    }

    /// A not-ready outcome caused by a transient failure.
    pub fn failed(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            ready: false,
            payload: None,
            failure: Some(reason.into()),
        }
    }
}

/// One readiness check of a named sub-resource against the backend.
///
/// Implementations perform exactly one read per invocation and never
/// retry internally; retry cadence is owned by the poll scheduler.
/// Failures must be captured as outcome data, never returned as `Err`
/// or panicked past this boundary -- a broken sub-resource must not
/// abort the other sub-resource's probe or cancel future ticks.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, document_id: DocumentId, kind: ResourceKind) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::SummaryPayload;

    fn summary_payload() -> ProbePayload {
        ProbePayload::Summary(SummaryPayload {
            summary_text: "s".into(),
            summary_type: "brief".into(),
            model_used: "m".into(),
            tokens_used: None,
            processing_time: None,
        })
    }

    #[test]
    fn ready_outcome_carries_payload_without_failure() {
        let outcome = ProbeOutcome::ready(ResourceKind::Summary, summary_payload());
        assert!(outcome.ready);
        assert!(outcome.payload.is_some());
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn pending_outcome_has_neither_payload_nor_failure() {
        let outcome = ProbeOutcome::pending(ResourceKind::Classification);
        assert!(!outcome.ready);
        assert!(outcome.payload.is_none());
        assert!(outcome.failure.is_none());
    }

    #[test]
    fn failed_outcome_records_reason() {
        let outcome = ProbeOutcome::failed(ResourceKind::Summary, "connection refused");
        assert!(!outcome.ready);
        assert_eq!(outcome.failure.as_deref(), Some("connection refused"));
    }
}
