//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` and `env_lock()` to prevent environment variable pollution.
//! - Every autoindex variable not named by a test is forced unset for its duration.

use std::sync::Mutex;

pub mod env_tests;

/// Every environment variable the loader reads.
pub const ALL_VARS: &[&str] = &[
    "CLUSTER_HOST",
    "CLUSTER_PORT",
    "CLUSTER_SCHEME",
    "CLUSTER_USERNAME",
    "CLUSTER_PASSWORD",
    "REQUEST_TIMEOUT_SECS",
    "POOL_MAX_IDLE_PER_HOST",
    "INDEXES",
    "SPECIAL_LIST",
    "QUERY_LIST",
    "CLASSIFICATION_MATCH",
    "RETRY_ATTEMPTS",
    "RETRY_DELAY_SECS",
    "CRON_SCHEDULE",
    "OVERLAP_GUARD",
    "LOG_FORMAT",
    "METRICS_BIND",
];

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run `f` with exactly `vars` set among the loader's variables.
pub fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let kvs: Vec<(&str, Option<&str>)> = ALL_VARS
        .iter()
        .map(|key| {
            let value = vars.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect();
    temp_env::with_vars(kvs, f)
}
