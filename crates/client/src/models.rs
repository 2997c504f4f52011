//! Data models for cluster API requests and responses.

use serde::Deserialize;

/// Error type the cluster returns when creating an index that already exists.
pub const RESOURCE_ALREADY_EXISTS: &str = "resource_already_exists_exception";

/// Successful result of an index creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The cluster created the index.
    Created,
    /// The cluster reported the index already exists (HTTP 400 conflict).
    AlreadyExists,
}

/// Error body returned by the cluster, e.g.
/// `{"error": {"type": "...", "reason": "..."}, "status": 400}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterErrorResponse {
    pub error: ClusterErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ClusterErrorResponse {
    /// Render as `type: reason`, falling back to the type alone.
    pub fn summary(&self) -> String {
        match &self.error.reason {
            Some(reason) => format!("{}: {}", self.error.error_type, reason),
            None => self.error.error_type.clone(),
        }
    }
}

/// Human-readable message for an error body, parsed when possible.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ClusterErrorResponse>(body)
        .map(|parsed| parsed.summary())
        .unwrap_or_else(|_| body.to_string())
}

/// Whether a 400 body carries the already-exists marker.
pub fn is_already_exists(body: &str) -> bool {
    body.contains(RESOURCE_ALREADY_EXISTS)
}
