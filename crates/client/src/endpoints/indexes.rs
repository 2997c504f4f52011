//! Index existence and creation endpoints.

use std::time::Duration;

use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::auth::Credentials;
use crate::endpoints::encode_path_segment;
use crate::endpoints::request::{api_error, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{CreateOutcome, error_message, is_already_exists};

/// Check whether an index exists (`HEAD /{name}`).
///
/// 2xx means the index exists and 404 means it does not. Any other status is
/// an error, so "not found" is never confused with a failed check.
pub async fn index_exists(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    name: &str,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<bool> {
    let url = format!("{}/{}", base_url, encode_path_segment(name));
    let builder = credentials.apply(client.head(&url));

    let response = send_request(builder, "index_exists", "HEAD", timeout, metrics).await?;
    let status = response.status();

    if status.is_success() {
        Ok(true)
    } else if status == StatusCode::NOT_FOUND {
        Ok(false)
    } else {
        let message = status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string();
        Err(api_error(
            "index_exists",
            "HEAD",
            status.as_u16(),
            &url,
            message,
            metrics,
        ))
    }
}

/// Create an index with a settings/mappings document (`PUT /{name}`).
///
/// An HTTP 400 whose body carries `resource_already_exists_exception` is a
/// success: [`CreateOutcome::AlreadyExists`].
pub async fn create_index(
    client: &Client,
    base_url: &str,
    credentials: &Credentials,
    name: &str,
    body: &str,
    timeout: Duration,
    metrics: Option<&MetricsCollector>,
) -> Result<CreateOutcome> {
    let url = format!("{}/{}", base_url, encode_path_segment(name));
    let builder = credentials.apply(
        client
            .put(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string()),
    );

    let response = send_request(builder, "create_index", "PUT", timeout, metrics).await?;
    let status = response.status();

    if status.is_success() {
        return Ok(CreateOutcome::Created);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    if status == StatusCode::BAD_REQUEST && is_already_exists(&text) {
        return Ok(CreateOutcome::AlreadyExists);
    }

    Err(api_error(
        "create_index",
        "PUT",
        status.as_u16(),
        &url,
        error_message(&text),
        metrics,
    ))
}
