//! Cluster REST client and the index capability it exposes.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `indexes`: [`IndexApi`] implementation
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retrying failed calls (see [`crate::retry`]); every method performs one attempt
//!
//! # Invariants
//! - One `reqwest::Client` (and its connection pool) per `ClusterClient`, shared by every call
//! - Every call is bounded by the configured per-call timeout

pub mod builder;
mod indexes;

use std::future::Future;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::CreateOutcome;

/// The two cluster operations index provisioning needs.
///
/// Implemented by [`ClusterClient`]; tests substitute in-memory fakes.
pub trait IndexApi: Send + Sync {
    /// `Ok(false)` for "not found"; errors only for genuine failures.
    fn index_exists(&self, name: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Create `name` with the JSON settings/mappings `body`.
    ///
    /// An "already exists" conflict is `Ok(CreateOutcome::AlreadyExists)`.
    fn create_index(
        &self,
        name: &str,
        body: &str,
    ) -> impl Future<Output = Result<CreateOutcome>> + Send;
}

/// HTTP client for a search cluster.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use autoindex_client::ClusterClient;
///
/// let client = ClusterClient::builder()
///     .base_url("http://localhost:9200".to_string())
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ClusterClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) timeout: Duration,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl ClusterClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ClusterClientBuilder {
        builder::ClusterClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }
}
