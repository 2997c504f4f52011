//! Cron scheduling of provisioning runs.
//!
//! [`ProvisionJob`] is one scheduled invocation: reload the provisioning
//! lists from the environment, then run a [`Provisioner`] for the local date.
//! [`Scheduler`] fires the job on every cron tick.
//!
//! # Invariants
//! - The cluster client is built once and shared by every invocation.
//! - A configuration error during a tick skips that tick only.
//! - With the overlap guard enabled, a tick that starts while another is
//!   running is skipped. Without it, ticks may overlap.

use std::sync::Arc;

use autoindex_client::{IndexApi, MetricsCollector, RetryPolicy};
use autoindex_config::{ConfigLoader, ProvisioningConfig, ScheduleConfig};
use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::error::{InvocationError, SchedulerError};
use crate::provisioner::{ProvisionReport, Provisioner};

/// Read the provisioning lists from the current environment.
pub fn load_provisioning() -> Result<ProvisioningConfig, autoindex_config::ConfigError> {
    Ok(ConfigLoader::new()
        .provisioning_from_env()?
        .build_provisioning())
}

/// One provisioning invocation, shared across cron ticks.
pub struct ProvisionJob<C> {
    client: Arc<C>,
    retry: RetryPolicy,
    metrics: Option<MetricsCollector>,
    guard: Option<Arc<Mutex<()>>>,
    provisioning: Option<ProvisioningConfig>,
}

impl<C> Clone for ProvisionJob<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            retry: self.retry,
            metrics: self.metrics.clone(),
            guard: self.guard.clone(),
            provisioning: self.provisioning.clone(),
        }
    }
}

impl<C: IndexApi + 'static> ProvisionJob<C> {
    pub fn new(client: Arc<C>, retry: RetryPolicy) -> Self {
        Self {
            client,
            retry,
            metrics: None,
            guard: None,
            provisioning: None,
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Skip ticks that start while a previous one is still running.
    pub fn with_overlap_guard(mut self, enabled: bool) -> Self {
        self.guard = enabled.then(|| Arc::new(Mutex::new(())));
        self
    }

    /// Use fixed lists instead of reloading them from the environment.
    pub fn with_provisioning(mut self, config: ProvisioningConfig) -> Self {
        self.provisioning = Some(config);
        self
    }

    /// Run one invocation for `today`.
    pub async fn run_once(&self, today: NaiveDate) -> Result<ProvisionReport, InvocationError> {
        let _permit = match &self.guard {
            Some(guard) => match guard.try_lock() {
                Ok(permit) => Some(permit),
                Err(_) => return Err(InvocationError::Overlapping),
            },
            None => None,
        };

        let config = match &self.provisioning {
            Some(config) => config.clone(),
            None => load_provisioning()?,
        };
        if config.prefixes.is_empty() {
            debug!("No index prefixes configured");
        }

        let mut provisioner = Provisioner::new(Arc::clone(&self.client), &config, self.retry);
        if let Some(metrics) = &self.metrics {
            provisioner = provisioner.with_metrics(metrics.clone());
        }
        Ok(provisioner.provision(today).await)
    }

    /// Run one invocation for the current local date, logging why it was skipped.
    pub async fn tick(&self) {
        match self.run_once(Local::now().date_naive()).await {
            Ok(_) => {}
            Err(InvocationError::Overlapping) => {
                warn!("Previous provisioning run still in progress, skipping tick");
            }
            Err(e) => error!(error = %e, "Provisioning run aborted"),
        }
    }
}

/// Running cron scheduler.
pub struct Scheduler {
    inner: JobScheduler,
}

impl Scheduler {
    /// Register `job` under `schedule` and start firing it.
    ///
    /// Cron expressions are evaluated in local time.
    pub async fn start<C: IndexApi + 'static>(
        schedule: &ScheduleConfig,
        job: ProvisionJob<C>,
    ) -> Result<Self, SchedulerError> {
        let inner = JobScheduler::new().await?;

        let cron_job = Job::new_async_tz(schedule.cron.as_str(), Local, move |_id, _sched| {
            let job = job.clone();
            Box::pin(async move {
                job.tick().await;
            })
        })
        .map_err(|source| SchedulerError::InvalidSchedule {
            schedule: schedule.cron.clone(),
            source,
        })?;

        inner.add(cron_job).await?;
        inner.start().await?;

        info!(
            schedule = %schedule.cron,
            overlap_guard = schedule.overlap_guard,
            "Scheduler started"
        );
        Ok(Self { inner })
    }

    /// Stop firing ticks.
    pub async fn shutdown(mut self) -> Result<(), SchedulerError> {
        self.inner.shutdown().await?;
        info!("Scheduler stopped");
        Ok(())
    }
}
