//! Error types for the autoindex job.

use autoindex_config::ConfigError;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;

/// Failures constructing or controlling the cron scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Invalid cron schedule '{schedule}': {source}")]
    InvalidSchedule {
        schedule: String,
        #[source]
        source: JobSchedulerError,
    },

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
}

/// Reasons a scheduled invocation did not run.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Previous invocation is still running")]
    Overlapping,

    #[error("Failed to load provisioning configuration: {0}")]
    Config(#[from] ConfigError),
}
