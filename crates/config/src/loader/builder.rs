//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges environment values
//!   with values set directly through builder methods.
//! - Validate and build the final `Config` or just the `ProvisioningConfig`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Cron expression semantics (validated when the job is registered).
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` override environment values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::{apply_env, apply_provisioning_env};
use super::error::ConfigError;
use super::schedule::normalize_cron_schedule;
use crate::constants::{
    DEFAULT_CRON_SCHEDULE, DEFAULT_POOL_MAX_IDLE_PER_HOST, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS, MAX_REQUEST_TIMEOUT_SECS,
    MAX_RETRY_ATTEMPTS,
};
use crate::types::{
    Config, ConnectionConfig, LogFormat, MatchMode, ProvisioningConfig, RetryConfig,
    ScheduleConfig, Scheme, TelemetryConfig,
};

/// Configuration loader that builds config from environment variables.
#[derive(Default)]
pub struct ConfigLoader {
    scheme: Option<Scheme>,
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<SecretString>,
    timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    prefixes: Option<Vec<String>>,
    special_list: Option<Vec<String>>,
    query_list: Option<Vec<String>>,
    match_mode: Option<MatchMode>,
    retry_attempts: Option<usize>,
    retry_delay: Option<Duration>,
    cron_schedule: Option<String>,
    overlap_guard: Option<bool>,
    log_format: Option<LogFormat>,
    metrics_bind: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Read only the provisioning lists from environment variables.
    pub fn provisioning_from_env(mut self) -> Result<Self, ConfigError> {
        apply_provisioning_env(&mut self)?;
        Ok(self)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = Some(prefixes);
        self
    }

    pub fn with_special_list(mut self, list: Vec<String>) -> Self {
        self.special_list = Some(list);
        self
    }

    pub fn with_query_list(mut self, list: Vec<String>) -> Self {
        self.query_list = Some(list);
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    /// Set the retry budget used for every cluster operation.
    pub fn with_retry(mut self, max_attempts: usize, delay: Duration) -> Self {
        self.retry_attempts = Some(max_attempts);
        self.retry_delay = Some(delay);
        self
    }

    pub fn with_cron_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.cron_schedule = Some(schedule.into());
        self
    }

    pub fn with_overlap_guard(mut self, enabled: bool) -> Self {
        self.overlap_guard = Some(enabled);
        self
    }

    /// Build only the provisioning lists.
    ///
    /// Unlike [`ConfigLoader::build`], this does not require connection settings.
    pub fn build_provisioning(&self) -> ProvisioningConfig {
        ProvisioningConfig {
            prefixes: self.prefixes.clone().unwrap_or_default(),
            special_list: self.special_list.clone().unwrap_or_default(),
            query_list: self.query_list.clone().unwrap_or_default(),
            match_mode: self.match_mode.unwrap_or_default(),
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let provisioning = self.build_provisioning();

        let host = self
            .host
            .ok_or_else(|| ConfigError::MissingEnvVar("CLUSTER_HOST".to_string()))?;
        let port = self
            .port
            .ok_or_else(|| ConfigError::MissingEnvVar("CLUSTER_PORT".to_string()))?;
        if port == 0 {
            return Err(ConfigError::invalid(
                "CLUSTER_PORT",
                "must be an integer between 1 and 65535 (got '0')",
            ));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(ConfigError::MissingEnvVar("CLUSTER_USERNAME".to_string()));
        }

        let connection = ConnectionConfig {
            scheme: self.scheme.unwrap_or_default(),
            host,
            port,
            username: self.username,
            password: self.password,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
        };
        Self::validate_timeout(&connection)?;

        let retry = RetryConfig {
            max_attempts: self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
            delay: self
                .retry_delay
                .unwrap_or(Duration::from_secs(DEFAULT_RETRY_DELAY_SECS)),
        };
        Self::validate_retry(&retry)?;

        let schedule = ScheduleConfig {
            cron: normalize_cron_schedule(
                self.cron_schedule.as_deref().unwrap_or(DEFAULT_CRON_SCHEDULE),
            )?,
            overlap_guard: self.overlap_guard.unwrap_or(false),
        };

        Ok(Config {
            connection,
            provisioning,
            retry,
            schedule,
            telemetry: TelemetryConfig {
                log_format: self.log_format.unwrap_or_default(),
                metrics_bind: self.metrics_bind,
            },
        })
    }

    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let secs = connection.timeout.as_secs();
        if secs == 0 {
            return Err(ConfigError::invalid(
                "REQUEST_TIMEOUT_SECS",
                "timeout must be greater than 0 seconds",
            ));
        }
        if secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::invalid(
                "REQUEST_TIMEOUT_SECS",
                format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_REQUEST_TIMEOUT_SECS
                ),
            ));
        }
        Ok(())
    }

    fn validate_retry(retry: &RetryConfig) -> Result<(), ConfigError> {
        if retry.max_attempts == 0 || retry.max_attempts > MAX_RETRY_ATTEMPTS {
            return Err(ConfigError::invalid(
                "RETRY_ATTEMPTS",
                format!(
                    "must be between 1 and {} (got {})",
                    MAX_RETRY_ATTEMPTS, retry.max_attempts
                ),
            ));
        }
        Ok(())
    }

    // Internal setters for use by env.rs

    pub(crate) fn set_scheme(&mut self, scheme: Option<Scheme>) {
        self.scheme = scheme;
    }

    pub(crate) fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    pub(crate) fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_pool_max_idle_per_host(&mut self, idle: Option<usize>) {
        self.pool_max_idle_per_host = idle;
    }

    pub(crate) fn set_prefixes(&mut self, prefixes: Option<Vec<String>>) {
        self.prefixes = prefixes;
    }

    pub(crate) fn set_special_list(&mut self, list: Option<Vec<String>>) {
        self.special_list = list;
    }

    pub(crate) fn set_query_list(&mut self, list: Option<Vec<String>>) {
        self.query_list = list;
    }

    pub(crate) fn set_match_mode(&mut self, mode: Option<MatchMode>) {
        self.match_mode = mode;
    }

    pub(crate) fn set_retry_attempts(&mut self, attempts: Option<usize>) {
        self.retry_attempts = attempts;
    }

    pub(crate) fn set_retry_delay(&mut self, delay: Option<Duration>) {
        self.retry_delay = delay;
    }

    pub(crate) fn set_cron_schedule(&mut self, schedule: Option<String>) {
        self.cron_schedule = schedule;
    }

    pub(crate) fn set_overlap_guard(&mut self, enabled: Option<bool>) {
        self.overlap_guard = enabled;
    }

    pub(crate) fn set_log_format(&mut self, format: Option<LogFormat>) {
        self.log_format = format;
    }

    pub(crate) fn set_metrics_bind(&mut self, bind: Option<String>) {
        self.metrics_bind = bind;
    }
}
