//! Merging per-resource probe outcomes into a session status verdict.
//!
//! Pure function with no I/O: the scheduler feeds it the current status
//! and the two fresh outcomes, and applies whatever comes back.

use crate::probe::ProbeOutcome;
use crate::status::SessionStatus;

/// Merge the two sub-resource outcomes into a new session status.
///
/// The session becomes `Complete` iff *both* outcomes are ready.
/// Sub-resources become ready independently and out of order, so a
/// single ready resource keeps the session `Processing`. A transient
/// failure on either resource is surfaced as the second tuple element
/// but does not move the status -- only full readiness or the timeout
/// guard ends `Processing`.
///
/// Terminal inputs pass through unchanged: status is monotonic and a
/// late merge must never resurrect a finished session.
pub fn merge_outcomes(
    current: SessionStatus,
    summary: &ProbeOutcome,
    classification: &ProbeOutcome,
) -> (SessionStatus, Option<String>) {
    if current.is_terminal() {
        return (current, None);
    }

    let transient = summary
        .failure
        .clone()
        .or_else(|| classification.failure.clone());

    if summary.ready && classification.ready {
        (SessionStatus::Complete, transient)
    } else {
        (SessionStatus::Processing, transient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ClassificationPayload, ProbePayload, SummaryPayload};
    use crate::types::ResourceKind;

    fn ready_summary() -> ProbeOutcome {
        ProbeOutcome::ready(
            ResourceKind::Summary,
            ProbePayload::Summary(SummaryPayload {
                summary_text: "s".into(),
                summary_type: "brief".into(),
                model_used: "m".into(),
                tokens_used: None,
                processing_time: None,
            }),
        )
    }

    fn ready_classification() -> ProbeOutcome {
        ProbeOutcome::ready(
            ResourceKind::Classification,
            ProbePayload::Classification(ClassificationPayload {
                primary_topic: "t".into(),
                confidence: 0.9,
                category: "c".into(),
                tags: vec![],
                model_used: "m".into(),
            }),
        )
    }

    #[test]
    fn both_ready_is_complete() {
        let (status, err) = merge_outcomes(
            SessionStatus::Processing,
            &ready_summary(),
            &ready_classification(),
        );
        assert_eq!(status, SessionStatus::Complete);
        assert!(err.is_none());
    }

    #[test]
    fn only_summary_ready_stays_processing() {
        let (status, err) = merge_outcomes(
            SessionStatus::Processing,
            &ready_summary(),
            &ProbeOutcome::pending(ResourceKind::Classification),
        );
        assert_eq!(status, SessionStatus::Processing);
        assert!(err.is_none());
    }

    #[test]
    fn only_classification_ready_stays_processing() {
        let (status, _) = merge_outcomes(
            SessionStatus::Processing,
            &ProbeOutcome::pending(ResourceKind::Summary),
            &ready_classification(),
        );
        assert_eq!(status, SessionStatus::Processing);
    }

    #[test]
    fn neither_ready_stays_processing() {
        let (status, err) = merge_outcomes(
            SessionStatus::Processing,
            &ProbeOutcome::pending(ResourceKind::Summary),
            &ProbeOutcome::pending(ResourceKind::Classification),
        );
        assert_eq!(status, SessionStatus::Processing);
        assert!(err.is_none());
    }

    #[test]
    fn transient_failure_is_surfaced_but_not_terminal() {
        let (status, err) = merge_outcomes(
            SessionStatus::Processing,
            &ready_summary(),
            &ProbeOutcome::failed(ResourceKind::Classification, "HTTP 500"),
        );
        assert_eq!(status, SessionStatus::Processing);
        assert_eq!(err.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn summary_failure_reported_first_when_both_fail() {
        let (_, err) = merge_outcomes(
            SessionStatus::Processing,
            &ProbeOutcome::failed(ResourceKind::Summary, "timed out"),
            &ProbeOutcome::failed(ResourceKind::Classification, "HTTP 502"),
        );
        assert_eq!(err.as_deref(), Some("timed out"));
    }

    #[test]
    fn complete_input_passes_through_unchanged() {
        let (status, err) = merge_outcomes(
            SessionStatus::Complete,
            &ProbeOutcome::pending(ResourceKind::Summary),
            &ProbeOutcome::pending(ResourceKind::Classification),
        );
        assert_eq!(status, SessionStatus::Complete);
        assert!(err.is_none());
    }

    #[test]
    fn timed_out_input_passes_through_unchanged() {
        let (status, _) = merge_outcomes(
            SessionStatus::TimedOut,
            &ready_summary(),
            &ready_classification(),
        );
        assert_eq!(status, SessionStatus::TimedOut);
    }
}
