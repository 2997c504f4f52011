//! Configuration types for the autoindex job.
//!
//! Responsibilities:
//! - Define the cluster connection settings (host, port, credentials, timeouts).
//! - Define the provisioning lists and the classification match mode.
//! - Define retry, schedule and telemetry settings.
//!
//! Does NOT handle:
//! - Loading from the environment (see `loader` module).
//! - Network connections (see client crate).
//!
//! Invariants:
//! - Passwords are held in `secrecy::SecretString` and never appear in `Debug` output.
//! - List fields never contain empty or whitespace-only entries.

use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CRON_SCHEDULE, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS,
};

/// URL scheme used to reach the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(format!("expected http or https, got '{other}'")),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How index names are matched against the classification lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The index prefix must equal a list entry.
    #[default]
    Exact,
    /// The full index name must contain a list entry.
    Substring,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "substring" => Ok(MatchMode::Substring),
            other => Err(format!("expected exact or substring, got '{other}'")),
        }
    }
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected text or json, got '{other}'")),
        }
    }
}

/// Connection settings for the search cluster.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    /// Basic auth username. No `Authorization` header is sent when unset.
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Per-call timeout applied to every cluster request.
    pub timeout: Duration,
    /// Idle connections kept in the pool per host.
    pub pool_max_idle_per_host: usize,
}

impl ConnectionConfig {
    /// Base URL of the cluster, e.g. `http://localhost:9200`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// Prefixes to provision and the lists that pick their template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisioningConfig {
    pub prefixes: Vec<String>,
    pub special_list: Vec<String>,
    pub query_list: Vec<String>,
    pub match_mode: MatchMode,
}

/// Bounded retry budget applied to each cluster operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Cron trigger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Six-field cron expression (seconds first).
    pub cron: String,
    /// Skip a tick while the previous invocation is still running.
    pub overlap_guard: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: DEFAULT_CRON_SCHEDULE.to_string(),
            overlap_guard: false,
        }
    }
}

/// Logging and metrics settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
    /// Bind address of the Prometheus exporter; disabled when `None`.
    pub metrics_bind: Option<String>,
}

/// Complete process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub provisioning: ProvisioningConfig,
    pub retry: RetryConfig,
    pub schedule: ScheduleConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Build a config for `host:port` with defaults everywhere else.
    ///
    /// Mostly useful in tests.
    pub fn for_host(host: impl Into<String>, port: u16) -> Self {
        Self {
            connection: ConnectionConfig {
                scheme: Scheme::Http,
                host: host.into(),
                port,
                username: None,
                password: None,
                timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            },
            provisioning: ProvisioningConfig::default(),
            retry: RetryConfig::default(),
            schedule: ScheduleConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}
