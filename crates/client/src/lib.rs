//! Search cluster REST client.
//!
//! This crate provides the index capability used by the provisioning job
//! ([`IndexApi`]), its HTTP implementation ([`ClusterClient`]), a bounded
//! fixed-delay retry helper, and the job's logging and metrics plumbing.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod retry;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::Credentials;
pub use client::builder::ClusterClientBuilder;
pub use client::{ClusterClient, IndexApi};
pub use error::{ClientError, Result};
pub use logging::{TracingError, init_tracing};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{CreateOutcome, RESOURCE_ALREADY_EXISTS};
pub use retry::{RetryPolicy, retry};
