//! Configuration management for the autoindex job.
//!
//! This crate provides types and loaders for the cluster connection, the
//! provisioning lists and the schedule, all read from environment variables
//! (optionally seeded from a `.env` file).

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none, normalize_cron_schedule, parse_list};
pub use types::{
    Config, ConnectionConfig, LogFormat, MatchMode, ProvisioningConfig, RetryConfig,
    ScheduleConfig, Scheme, TelemetryConfig,
};
