//! Typed payloads returned by the document backend's status endpoints.
//!
//! Field sets match the rows the backend writes to its
//! `document_summaries` and `document_classifications` tables. Unknown
//! extra fields (ids, created_at, etc.) are ignored on deserialize.

use serde::{Deserialize, Serialize};

use crate::types::ResourceKind;

/// A generated summary for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPayload {
    /// The summary text itself.
    pub summary_text: String,
    /// Summary style requested at generation time (e.g. `brief`).
    pub summary_type: String,
    /// Name of the model that produced the summary.
    pub model_used: String,
    /// Token count reported by the model, if available.
    #[serde(default)]
    pub tokens_used: Option<i64>,
    /// Generation wall time in seconds, if available.
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// A topic classification for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPayload {
    /// The most likely topic.
    pub primary_topic: String,
    /// Model confidence in `primary_topic` (0.0-1.0).
    pub confidence: f64,
    /// Broad category bucket (e.g. `other`).
    pub category: String,
    /// Free-form topic tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Name of the model that produced the classification.
    pub model_used: String,
}

/// Payload carried by a ready probe outcome, one variant per sub-resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProbePayload {
    Summary(SummaryPayload),
    Classification(ClassificationPayload),
}

impl ProbePayload {
    /// Which sub-resource this payload belongs to.
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::Summary(_) => ResourceKind::Summary,
            Self::Classification(_) => ResourceKind::Classification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_payload_deserializes_backend_row() {
        let json = serde_json::json!({
            "id": "f8a9e2d1-0000-0000-0000-000000000001",
            "document_id": "f8a9e2d1-0000-0000-0000-000000000002",
            "summary_text": "A short summary.",
            "summary_type": "brief",
            "model_used": "gpt-4o-mini",
            "tokens_used": 512,
            "processing_time": 1.42,
            "created_at": "2025-01-01T00:00:00Z"
        });

        let payload: SummaryPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.summary_text, "A short summary.");
        assert_eq!(payload.summary_type, "brief");
        assert_eq!(payload.tokens_used, Some(512));
    }

    #[test]
    fn summary_payload_optional_fields_default_to_none() {
        let json = serde_json::json!({
            "summary_text": "s",
            "summary_type": "brief",
            "model_used": "m"
        });

        let payload: SummaryPayload = serde_json::from_value(json).unwrap();
        assert!(payload.tokens_used.is_none());
        assert!(payload.processing_time.is_none());
    }

    #[test]
    fn classification_payload_deserializes_backend_row() {
        let json = serde_json::json!({
            "document_id": "f8a9e2d1-0000-0000-0000-000000000002",
            "primary_topic": "linear algebra",
            "confidence": 0.92,
            "category": "mathematics",
            "tags": ["matrices", "eigenvalues"],
            "model_used": "gpt-4o-mini",
            "created_at": "2025-01-01T00:00:00Z"
        });

        let payload: ClassificationPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.primary_topic, "linear algebra");
        assert_eq!(payload.tags.len(), 2);
    }

    #[test]
    fn classification_payload_missing_tags_defaults_empty() {
        let json = serde_json::json!({
            "primary_topic": "unknown",
            "confidence": 0.5,
            "category": "other",
            "model_used": "m"
        });

        let payload: ClassificationPayload = serde_json::from_value(json).unwrap();
        assert!(payload.tags.is_empty());
    }

    #[test]
    fn classification_payload_missing_required_field_rejected() {
        let json = serde_json::json!({
            "confidence": 0.5,
            "category": "other",
            "model_used": "m"
        });

        assert!(serde_json::from_value::<ClassificationPayload>(json).is_err());
    }

    #[test]
    fn probe_payload_reports_resource_kind() {
        let summary = ProbePayload::Summary(SummaryPayload {
            summary_text: "s".into(),
            summary_type: "brief".into(),
            model_used: "m".into(),
            tokens_used: None,
            processing_time: None,
        });
        assert_eq!(summary.resource_kind(), ResourceKind::Summary);

        let class = ProbePayload::Classification(ClassificationPayload {
            primary_topic: "t".into(),
            confidence: 1.0,
            category: "c".into(),
            tags: vec![],
            model_used: "m".into(),
        });
        assert_eq!(class.resource_kind(), ResourceKind::Classification);
    }
}
