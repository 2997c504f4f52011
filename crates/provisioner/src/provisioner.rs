//! Index Provisioner.
//!
//! One call to [`Provisioner::provision`] handles every configured prefix:
//! check whether tomorrow's index exists, and if not, create it with the
//! classified template. Names are processed strictly in order.
//!
//! # Invariants
//! - A failed existence check never leads to a create call.
//! - An existing index never receives a create call.
//! - An "already exists" conflict on creation counts as success.
//! - A failure on one name never stops the remaining names.

use std::sync::Arc;
use std::time::Instant;

use autoindex_client::{ClientError, CreateOutcome, IndexApi, MetricsCollector, RetryPolicy, retry};
use autoindex_config::ProvisioningConfig;
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::classify::Classifier;
use crate::naming::IndexName;
use crate::template::IndexTemplate;

/// Terminal state of one index name.
#[derive(Debug)]
pub enum ProvisionOutcome {
    /// The index was already present; no create call was made.
    Exists,
    /// The cluster created the index.
    Created,
    /// The create call hit "already exists" (another writer won the race).
    ConflictResolvedAsCreated,
    /// The existence check failed after every retry; creation was skipped.
    ExistenceCheckFailed(ClientError),
    /// Creation failed after every retry.
    FailedAfterRetries(ClientError),
}

impl ProvisionOutcome {
    /// Label used in logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProvisionOutcome::Exists => "exists",
            ProvisionOutcome::Created => "created",
            ProvisionOutcome::ConflictResolvedAsCreated => "conflict_resolved",
            ProvisionOutcome::ExistenceCheckFailed(_) => "existence_check_failed",
            ProvisionOutcome::FailedAfterRetries(_) => "failed_after_retries",
        }
    }

    /// Whether the index is known to exist after this outcome.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ProvisionOutcome::Exists
                | ProvisionOutcome::Created
                | ProvisionOutcome::ConflictResolvedAsCreated
        )
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            ProvisionOutcome::ExistenceCheckFailed(e) | ProvisionOutcome::FailedAfterRetries(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

/// Result for one index name.
#[derive(Debug)]
pub struct ProvisionEntry {
    pub name: IndexName,
    /// `None` when no creation was attempted.
    pub template: Option<IndexTemplate>,
    pub outcome: ProvisionOutcome,
}

/// Every entry of one invocation, in processing order.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub entries: Vec<ProvisionEntry>,
}

impl ProvisionReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose outcome has the given label.
    pub fn count(&self, outcome: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.as_str() == outcome)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.outcome.is_success())
            .count()
    }

    pub fn get(&self, name: &str) -> Option<&ProvisionEntry> {
        self.entries.iter().find(|e| e.name.to_string() == name)
    }
}

/// Ensures tomorrow's indexes exist.
pub struct Provisioner<C> {
    client: Arc<C>,
    prefixes: Vec<String>,
    classifier: Classifier,
    retry: RetryPolicy,
    metrics: Option<MetricsCollector>,
}

impl<C: IndexApi> Provisioner<C> {
    pub fn new(client: Arc<C>, config: &ProvisioningConfig, retry: RetryPolicy) -> Self {
        Self {
            client,
            prefixes: config.prefixes.clone(),
            classifier: Classifier::from_config(config),
            retry,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Provision the indexes for the day after `today`.
    pub async fn provision(&self, today: NaiveDate) -> ProvisionReport {
        let start = Instant::now();
        let names = IndexName::for_tomorrow(&self.prefixes, today);
        let mut report = ProvisionReport {
            entries: Vec::with_capacity(names.len()),
        };

        for name in names {
            let entry = self.provision_one(name).await;
            if let Some(m) = &self.metrics {
                m.record_outcome(entry.outcome.as_str(), entry.template.map(|t| t.as_str()));
            }
            report.entries.push(entry);
        }

        let elapsed = start.elapsed();
        if let Some(m) = &self.metrics {
            m.record_invocation(elapsed);
        }
        info!(
            target_date = %IndexName::target_date(today),
            total = report.len(),
            existing = report.count("exists"),
            created = report.count("created") + report.count("conflict_resolved"),
            failed = report.failures(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Provisioning run finished"
        );

        report
    }

    async fn provision_one(&self, name: IndexName) -> ProvisionEntry {
        let index = name.to_string();
        let metrics = self.metrics.as_ref();

        let exists = retry(self.retry, "index_exists", metrics, || {
            self.client.index_exists(&index)
        })
        .await;

        match exists {
            Err(e) => {
                error!(index = %index, error = %e, "Failed to check whether index exists, skipping");
                return ProvisionEntry {
                    name,
                    template: None,
                    outcome: ProvisionOutcome::ExistenceCheckFailed(e),
                };
            }
            Ok(true) => {
                info!(index = %index, "Index already exists");
                return ProvisionEntry {
                    name,
                    template: None,
                    outcome: ProvisionOutcome::Exists,
                };
            }
            Ok(false) => {}
        }

        let template = self.classifier.classify(&name);
        let body = template.body();

        let outcome = match retry(self.retry, "create_index", metrics, || {
            self.client.create_index(&index, &body)
        })
        .await
        {
            Ok(CreateOutcome::Created) => {
                info!(index = %index, template = %template, "Index created");
                ProvisionOutcome::Created
            }
            Ok(CreateOutcome::AlreadyExists) => {
                warn!(index = %index, "Index was created concurrently");
                ProvisionOutcome::ConflictResolvedAsCreated
            }
            Err(e) => {
                error!(index = %index, template = %template, error = %e, "Failed to create index");
                ProvisionOutcome::FailedAfterRetries(e)
            }
        };

        ProvisionEntry {
            name,
            template: Some(template),
            outcome,
        }
    }
}
