//! Network implementation of the [`Prober`] seam.
//!
//! [`HttpProber`] performs exactly one GET per probe and converts every
//! failure into [`ProbeOutcome`] data. Nothing escapes this boundary as
//! `Err` or a panic: a slow or broken sub-resource must not abort the
//! other sub-resource's probe or cancel future ticks.

use docpulse_core::payload::ProbePayload;
use docpulse_core::probe::{ProbeOutcome, Prober};
use docpulse_core::types::{DocumentId, ResourceKind};

use crate::api::{DocumentApi, DocumentApiError};

/// Probes sub-resource readiness over the backend HTTP API.
pub struct HttpProber {
    api: DocumentApi,
}

impl HttpProber {
    /// Create a prober over an existing API client.
    pub fn new(api: DocumentApi) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, document_id: DocumentId, kind: ResourceKind) -> ProbeOutcome {
        let result = match kind {
            ResourceKind::Summary => self
                .api
                .get_summary(document_id)
                .await
                .map(ProbePayload::Summary),
            ResourceKind::Classification => self
                .api
                .get_classification(document_id)
                .await
                .map(ProbePayload::Classification),
        };

        outcome_from_result(document_id, kind, result)
    }
}

/// Convert an API result into a probe outcome.
///
/// 404 is the backend's ordinary "not ready yet" signal and produces a
/// quiet pending outcome. Any other failure (transport error, unexpected
/// status, malformed payload) is a transient failure: still not ready,
/// with the reason recorded and logged at warn.
fn outcome_from_result(
    document_id: DocumentId,
    kind: ResourceKind,
    result: Result<ProbePayload, DocumentApiError>,
) -> ProbeOutcome {
    match result {
        Ok(payload) => {
            tracing::debug!(
                document_id = %document_id,
                kind = kind.as_str(),
                "Sub-resource ready",
            );
            ProbeOutcome::ready(kind, payload)
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(
                document_id = %document_id,
                kind = kind.as_str(),
                "Sub-resource not ready yet",
            );
            ProbeOutcome::pending(kind)
        }
        Err(e) => {
            tracing::warn!(
                document_id = %document_id,
                kind = kind.as_str(),
                error = %e,
                "Probe failed",
            );
            ProbeOutcome::failed(kind, e.to_string())
        }
    }
}
