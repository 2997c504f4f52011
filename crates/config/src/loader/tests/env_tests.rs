//! Environment variable tests for the configuration loader.

use secrecy::ExposeSecret;
use serial_test::serial;
use std::time::Duration;

use super::{env_lock, with_env};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{LogFormat, MatchMode, Scheme};

#[test]
#[serial]
fn test_full_environment() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("CLUSTER_HOST", "es.internal"),
            ("CLUSTER_PORT", "9200"),
            ("CLUSTER_USERNAME", "elastic"),
            ("CLUSTER_PASSWORD", "changeme"),
            ("INDEXES", "logs,metrics,audit"),
            ("SPECIAL_LIST", "metrics"),
            ("QUERY_LIST", "audit"),
            ("CRON_SCHEDULE", "0 1 * * *"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.base_url(), "http://es.internal:9200");
            assert_eq!(config.connection.username.as_deref(), Some("elastic"));
            assert_eq!(
                config.connection.password.as_ref().unwrap().expose_secret(),
                "changeme"
            );
            assert_eq!(
                config.provisioning.prefixes,
                vec!["logs", "metrics", "audit"]
            );
            assert_eq!(config.provisioning.special_list, vec!["metrics"]);
            assert_eq!(config.provisioning.query_list, vec!["audit"]);
            assert_eq!(config.provisioning.match_mode, MatchMode::Exact);
            assert_eq!(config.schedule.cron, "0 0 1 * * *");
        },
    );
}

#[test]
#[serial]
fn test_defaults_when_optional_vars_unset() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[("CLUSTER_HOST", "localhost"), ("CLUSTER_PORT", "9200")],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.scheme, Scheme::Http);
            assert!(config.connection.username.is_none());
            assert!(config.connection.password.is_none());
            assert_eq!(config.connection.timeout, Duration::from_secs(10));
            assert_eq!(config.connection.pool_max_idle_per_host, 10);
            assert!(config.provisioning.prefixes.is_empty());
            assert!(config.provisioning.special_list.is_empty());
            assert!(config.provisioning.query_list.is_empty());
            assert_eq!(config.retry.max_attempts, 3);
            assert_eq!(config.retry.delay, Duration::from_secs(2));
            assert_eq!(config.schedule.cron, "0 * * * * *");
            assert!(!config.schedule.overlap_guard);
            assert_eq!(config.telemetry.log_format, LogFormat::Text);
            assert!(config.telemetry.metrics_bind.is_none());
        },
    );
}

#[test]
#[serial]
fn test_optional_overrides() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("CLUSTER_HOST", "localhost"),
            ("CLUSTER_PORT", "9243"),
            ("CLUSTER_SCHEME", "HTTPS"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("POOL_MAX_IDLE_PER_HOST", "2"),
            ("CLASSIFICATION_MATCH", "substring"),
            ("RETRY_ATTEMPTS", "5"),
            ("RETRY_DELAY_SECS", "1"),
            ("OVERLAP_GUARD", "true"),
            ("LOG_FORMAT", "json"),
            ("METRICS_BIND", "127.0.0.1:9090"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.connection.base_url(), "https://localhost:9243");
            assert_eq!(config.connection.timeout, Duration::from_secs(5));
            assert_eq!(config.connection.pool_max_idle_per_host, 2);
            assert_eq!(config.provisioning.match_mode, MatchMode::Substring);
            assert_eq!(config.retry.max_attempts, 5);
            assert_eq!(config.retry.delay, Duration::from_secs(1));
            assert!(config.schedule.overlap_guard);
            assert_eq!(config.telemetry.log_format, LogFormat::Json);
            assert_eq!(
                config.telemetry.metrics_bind.as_deref(),
                Some("127.0.0.1:9090")
            );
        },
    );
}

#[test]
#[serial]
fn test_whitespace_only_vars_treated_as_unset() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("CLUSTER_HOST", "localhost"),
            ("CLUSTER_PORT", " 9200 "),
            ("SPECIAL_LIST", "   "),
            ("CLUSTER_USERNAME", ""),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.port, 9200);
            assert!(config.provisioning.special_list.is_empty());
            assert!(config.connection.username.is_none());
        },
    );
}

#[test]
#[serial]
fn test_unparseable_port_is_invalid_value() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[("CLUSTER_HOST", "localhost"), ("CLUSTER_PORT", "nine")],
        || {
            let err = ConfigLoader::new().from_env().err().unwrap();
            match err {
                ConfigError::InvalidValue { var, message } => {
                    assert_eq!(var, "CLUSTER_PORT");
                    assert!(message.contains("nine"));
                }
                other => panic!("Expected InvalidValue, got {:?}", other),
            }
        },
    );
}

#[test]
#[serial]
fn test_missing_port_is_reported() {
    let _lock = env_lock().lock().unwrap();

    with_env(&[("CLUSTER_HOST", "localhost")], || {
        let err = ConfigLoader::new().from_env().unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "CLUSTER_PORT"));
    });
}

#[test]
#[serial]
fn test_invalid_match_mode_is_rejected() {
    let _lock = env_lock().lock().unwrap();

    with_env(&[("CLASSIFICATION_MATCH", "fuzzy")], || {
        let err = ConfigLoader::new().from_env().err().unwrap();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "CLASSIFICATION_MATCH")
        );
    });
}

#[test]
#[serial]
fn test_provisioning_from_env_ignores_connection_vars() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("CLUSTER_PORT", "not-a-port"),
            ("INDEXES", "logs"),
            ("QUERY_LIST", "audit,search"),
        ],
        || {
            let provisioning = ConfigLoader::new()
                .provisioning_from_env()
                .unwrap()
                .build_provisioning();
            assert_eq!(provisioning.prefixes, vec!["logs"]);
            assert!(provisioning.special_list.is_empty());
            assert_eq!(provisioning.query_list, vec!["audit", "search"]);
        },
    );
}

#[test]
#[serial]
fn test_builder_methods_override_env() {
    let _lock = env_lock().lock().unwrap();

    with_env(
        &[
            ("CLUSTER_HOST", "from-env"),
            ("CLUSTER_PORT", "9200"),
            ("INDEXES", "logs"),
        ],
        || {
            let config = ConfigLoader::new()
                .from_env()
                .unwrap()
                .with_host("from-builder")
                .with_prefixes(vec!["orders".to_string()])
                .build()
                .unwrap();
            assert_eq!(config.connection.host, "from-builder");
            assert_eq!(config.provisioning.prefixes, vec!["orders"]);
        },
    );
}
