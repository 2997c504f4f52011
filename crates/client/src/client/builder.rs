//! Client builder for constructing [`ClusterClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the base URL
//! - Configuring the underlying HTTP client (timeout, idle pool size, redirects)
//!
//! # Invariants
//! - `base_url` is required, must be http(s) and never ends with a slash
//! - The per-call timeout is applied both to the HTTP client and to each request

use std::time::Duration;

use autoindex_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_REQUEST_TIMEOUT_SECS},
};

use crate::auth::Credentials;
use crate::client::ClusterClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`ClusterClient`].
pub struct ClusterClientBuilder {
    base_url: Option<String>,
    credentials: Credentials,
    timeout: Duration,
    pool_max_idle_per_host: usize,
    metrics: Option<MetricsCollector>,
}

impl Default for ClusterClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: Credentials::None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            metrics: None,
        }
    }
}

impl ClusterClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the cluster, e.g. `http://localhost:9200`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the per-call timeout. Default is 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of idle connections kept per host. Default is 10.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Record request metrics through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let connection = &config.connection;
        self.base_url = Some(connection.base_url());
        self.credentials =
            Credentials::from_parts(connection.username.clone(), connection.password.clone());
        self.timeout = connection.timeout;
        self.pool_max_idle_per_host = connection.pool_max_idle_per_host;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ClusterClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not http(s).
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ClusterClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url} must start with http:// or https://"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        Ok(ClusterClient {
            http,
            base_url,
            credentials: self.credentials,
            timeout: self.timeout,
            metrics: self.metrics,
        })
    }
}
