//! Metrics collection for cluster calls and provisioning outcomes.
//!
//! # What this module does NOT handle:
//! - Metrics exposition (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - All metrics use consistent label names: `operation`, `method`, `status`, `error_category`, `outcome`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "autoindex_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "autoindex_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "autoindex_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "autoindex_errors_total";

/// Metric name for per-index provisioning outcomes.
pub const METRIC_PROVISION_OUTCOMES: &str = "autoindex_provision_outcomes_total";

/// Metric name for full invocation duration.
pub const METRIC_INVOCATION_DURATION: &str = "autoindex_invocation_duration_seconds";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS and other transport failures
    Transport,
    /// HTTP 4xx from the cluster
    Http4xx,
    /// HTTP 5xx from the cluster
    Http5xx,
    /// Per-call timeout
    Timeout,
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout(_) => ErrorCategory::Timeout,
            ClientError::ConnectionRefused(_) | ClientError::HttpError(_) => {
                ErrorCategory::Transport
            }
            ClientError::ApiError { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            ClientError::ApiError { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Thin wrapper around the `metrics` macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one request attempt and its duration.
    ///
    /// `status` is `None` when no response was received.
    pub fn record_request(
        &self,
        operation: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a retry (not the initial attempt).
    pub fn record_retry(&self, operation: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "operation" => operation.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record a failed request, categorized from the error.
    pub fn record_client_error(&self, operation: &str, method: &str, error: &ClientError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }

    /// Record the terminal state of one index name.
    pub fn record_outcome(&self, outcome: &'static str, template: Option<&'static str>) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_PROVISION_OUTCOMES,
            "outcome" => outcome,
            "template" => template.unwrap_or("none"),
        )
        .increment(1);
    }

    /// Record the duration of one scheduled invocation.
    pub fn record_invocation(&self, duration: Duration) {
        if !self.enabled {
            return;
        }

        metrics::histogram!(METRIC_INVOCATION_DURATION).record(duration.as_secs_f64());
    }
}
