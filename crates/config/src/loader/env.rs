//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the autoindex environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Split comma-separated list variables.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::LIST_SEPARATOR;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// `""` yields an empty list rather than a list holding one empty entry, so an
/// unset classification list can never match every index name.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: FromStr>(var: &str, value: &str, message: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::invalid(var, format!("{message} (got '{value}')")))
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(host) = env_var_or_none("CLUSTER_HOST") {
        loader.set_host(Some(host));
    }
    if let Some(port) = env_var_or_none("CLUSTER_PORT") {
        loader.set_port(Some(parse_var(
            "CLUSTER_PORT",
            &port,
            "must be an integer between 1 and 65535",
        )?));
    }
    if let Some(scheme) = env_var_or_none("CLUSTER_SCHEME") {
        loader.set_scheme(Some(
            scheme
                .parse()
                .map_err(|message: String| ConfigError::invalid("CLUSTER_SCHEME", message))?,
        ));
    }
    if let Some(username) = env_var_or_none("CLUSTER_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("CLUSTER_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(timeout) = env_var_or_none("REQUEST_TIMEOUT_SECS") {
        let secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(idle) = env_var_or_none("POOL_MAX_IDLE_PER_HOST") {
        loader.set_pool_max_idle_per_host(Some(parse_var(
            "POOL_MAX_IDLE_PER_HOST",
            &idle,
            "must be a non-negative integer",
        )?));
    }

    apply_provisioning_env(loader)?;

    if let Some(attempts) = env_var_or_none("RETRY_ATTEMPTS") {
        loader.set_retry_attempts(Some(parse_var(
            "RETRY_ATTEMPTS",
            &attempts,
            "must be a positive integer",
        )?));
    }
    if let Some(delay) = env_var_or_none("RETRY_DELAY_SECS") {
        let secs: u64 = parse_var("RETRY_DELAY_SECS", &delay, "must be a number")?;
        loader.set_retry_delay(Some(Duration::from_secs(secs)));
    }
    if let Some(schedule) = env_var_or_none("CRON_SCHEDULE") {
        loader.set_cron_schedule(Some(schedule));
    }
    if let Some(guard) = env_var_or_none("OVERLAP_GUARD") {
        loader.set_overlap_guard(Some(parse_var(
            "OVERLAP_GUARD",
            &guard,
            "must be true or false",
        )?));
    }
    if let Some(format) = env_var_or_none("LOG_FORMAT") {
        loader.set_log_format(Some(
            format
                .parse()
                .map_err(|message: String| ConfigError::invalid("LOG_FORMAT", message))?,
        ));
    }
    if let Some(bind) = env_var_or_none("METRICS_BIND") {
        loader.set_metrics_bind(Some(bind));
    }

    Ok(())
}

/// Apply only the provisioning lists and match mode.
///
/// These are re-read on every scheduled invocation.
pub fn apply_provisioning_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(indexes) = env_var_or_none("INDEXES") {
        loader.set_prefixes(Some(parse_list(&indexes)));
    }
    if let Some(special) = env_var_or_none("SPECIAL_LIST") {
        loader.set_special_list(Some(parse_list(&special)));
    }
    if let Some(query) = env_var_or_none("QUERY_LIST") {
        loader.set_query_list(Some(parse_list(&query)));
    }
    if let Some(mode) = env_var_or_none("CLASSIFICATION_MATCH") {
        loader.set_match_mode(Some(
            mode.parse()
                .map_err(|message: String| ConfigError::invalid("CLASSIFICATION_MATCH", message))?,
        ));
    }
    Ok(())
}
