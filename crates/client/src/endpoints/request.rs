//! Request dispatch shared by all endpoints.
//!
//! Sends a prepared request once, records metrics for the attempt and maps
//! transport failures into [`ClientError`]. Retrying is the caller's concern
//! (see [`crate::retry`]).

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Send a request, bounded by `timeout`.
///
/// Any HTTP status is returned as `Ok`; status interpretation belongs to the
/// endpoint. Only transport failures and timeouts are errors here.
pub async fn send_request(
    builder: RequestBuilder,
    operation: &str,
    method: &str,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let start = Instant::now();
    let result = builder.timeout(timeout).send().await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => {
            let status = response.status().as_u16();
            debug!(
                operation,
                method,
                status,
                elapsed_ms = elapsed.as_millis() as u64,
                "Cluster responded"
            );
            if let Some(m) = metrics {
                m.record_request(operation, method, elapsed, Some(status));
            }
            Ok(response)
        }
        Err(e) => {
            let err = ClientError::from_reqwest(e, timeout);
            if let Some(m) = metrics {
                m.record_request(operation, method, elapsed, None);
                m.record_client_error(operation, method, &err);
            }
            Err(err)
        }
    }
}

/// Build an [`ClientError::ApiError`] and record it.
pub(crate) fn api_error(
    operation: &str,
    method: &str,
    status: u16,
    url: &str,
    message: String,
    metrics: Option<&MetricsCollector>,
) -> ClientError {
    let err = ClientError::ApiError {
        status,
        url: url.to_string(),
        message,
    };
    if let Some(m) = metrics {
        m.record_client_error(operation, method, &err);
    }
    err
}
