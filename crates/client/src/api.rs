//! REST API client for the document backend's status endpoints.
//!
//! Wraps the two read-only readiness endpoints
//! (`GET /documents/{id}/summary` and `GET /documents/{id}/classification`)
//! using [`reqwest`]. The backend returns 404 until the corresponding row
//! exists, then 200 with the row as JSON.

use docpulse_core::payload::{ClassificationPayload, SummaryPayload};
use docpulse_core::types::DocumentId;

/// HTTP client for a single document backend.
pub struct DocumentApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the document backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum DocumentApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Document API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend returned 2xx but the body did not parse as the
    /// expected payload.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl DocumentApiError {
    /// HTTP status code of the failure, if the request reached the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::ApiError { status, .. } => Some(*status),
            Self::MalformedPayload(_) => None,
        }
    }

    /// Whether this error is the backend's ordinary "not there yet"
    /// signal (HTTP 404) rather than something unexpected.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl DocumentApi {
    /// Create a new API client for a document backend.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:8000`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across multiple sessions).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Base HTTP URL of the backend.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the summary for a document.
    ///
    /// Sends a `GET /documents/{id}/summary` request. Returns the latest
    /// summary row once summarization has finished; 404 until then.
    pub async fn get_summary(
        &self,
        document_id: DocumentId,
    ) -> Result<SummaryPayload, DocumentApiError> {
        let response = self
            .client
            .get(format!("{}/documents/{}/summary", self.api_url, document_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the classification for a document.
    ///
    /// Sends a `GET /documents/{id}/classification` request. Returns the
    /// latest classification row once classification has finished; 404
    /// until then.
    pub async fn get_classification(
        &self,
        document_id: DocumentId,
    ) -> Result<ClassificationPayload, DocumentApiError> {
        let response = self
            .client
            .get(format!(
                "{}/documents/{}/classification",
                self.api_url, document_id
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`DocumentApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, DocumentApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DocumentApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected payload.
    ///
    /// A 2xx body that fails to deserialize is reported as
    /// [`DocumentApiError::MalformedPayload`] so the caller can treat it
    /// as a transient failure rather than readiness.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DocumentApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DocumentApiError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reports_status() {
        let err = DocumentApiError::ApiError {
            status: 404,
            body: "{\"detail\":\"Summary not found\"}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn non_404_api_error_is_not_not_found() {
        let err = DocumentApiError::ApiError {
            status: 500,
            body: "internal".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn malformed_payload_has_no_status() {
        let err = DocumentApiError::MalformedPayload("missing field".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn api_error_display_includes_status_and_body() {
        let err = DocumentApiError::ApiError {
            status: 503,
            body: "unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("unavailable"));
    }
}
