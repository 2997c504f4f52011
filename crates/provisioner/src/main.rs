//! autoindex - creates tomorrow's indexes on a cron schedule.
//!
//! Responsibilities:
//! - Load `.env` and the environment into a validated configuration.
//! - Install logging and, when `METRICS_BIND` is set, the Prometheus exporter.
//! - Build the shared cluster client and start the scheduler.
//!
//! Invariants:
//! - Any startup error is reported and the process exits with status 1
//!   before anything is scheduled.
//! - The process runs until Ctrl+C.

use std::sync::Arc;

use anyhow::Context;
use autoindex::{ProvisionJob, Scheduler};
use autoindex_client::{ClusterClient, MetricsCollector, MetricsExporter, init_tracing};
use autoindex_config::{Config, ConfigLoader};
use tracing::{error, info};

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::new()
        .load_dotenv()
        .and_then(ConfigLoader::from_env)
        .and_then(ConfigLoader::build)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = init_tracing(config.telemetry.log_format) {
        eprintln!("{}", e);
        std::process::exit(EXIT_FAILURE);
    }

    if let Err(e) = run(config).await {
        error!(error = %format!("{e:#}"), "autoindex stopped");
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let exporter = config
        .telemetry
        .metrics_bind
        .as_deref()
        .map(MetricsExporter::install)
        .transpose()
        .context("Failed to start metrics exporter")?;
    let metrics = exporter.as_ref().map(|_| MetricsCollector::new());

    let mut builder = ClusterClient::builder().from_config(&config);
    if let Some(m) = &metrics {
        builder = builder.metrics(m.clone());
    }
    let client = Arc::new(builder.build().context("Failed to build cluster client")?);

    info!(
        cluster = client.base_url(),
        prefixes = config.provisioning.prefixes.len(),
        match_mode = ?config.provisioning.match_mode,
        "autoindex starting"
    );

    let mut job = ProvisionJob::new(client, config.retry.into())
        .with_overlap_guard(config.schedule.overlap_guard);
    if let Some(m) = metrics {
        job = job.with_metrics(m);
    }

    let scheduler = Scheduler::start(&config.schedule, job)
        .await
        .context("Failed to start scheduler")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    info!("Interrupt received, shutting down");

    scheduler.shutdown().await.context("Failed to stop scheduler")?;
    Ok(())
}
