//! Error types for the cluster client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during cluster client operations.
///
/// An "index already exists" conflict on creation is not an error; it is
/// reported as [`crate::models::CreateOutcome::AlreadyExists`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error status returned by the cluster.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Request exceeded the per-call timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Retry budget exhausted without a recorded failure (zero attempts).
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Map a `reqwest` error, separating timeouts and refused connections.
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            ClientError::Timeout(timeout)
        } else if error.is_connect() {
            let target = error
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "cluster".to_string());
            ClientError::ConnectionRefused(target)
        } else {
            ClientError::HttpError(error)
        }
    }

    /// Check if this error is transport-level (no response from the cluster).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Timeout(_) | Self::ConnectionRefused(_)
        )
    }

    /// HTTP status returned by the cluster, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
