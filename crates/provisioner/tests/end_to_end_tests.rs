//! Provisioning against a mock cluster over HTTP.
//!
//! # Invariants
//! - Tomorrow's name is `prefix + YYYYMMDD`
//! - Creation is a `PUT` with the classified template as its JSON body
//! - A failed existence check produces no `PUT`

use std::sync::Arc;
use std::time::Duration;

use autoindex::{ProvisionOutcome, Provisioner};
use autoindex_client::testing::load_fixture;
use autoindex_client::{ClusterClient, RetryPolicy};
use autoindex_config::{MatchMode, ProvisioningConfig};
use chrono::NaiveDate;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

fn config(prefixes: &[&str], special: &[&str]) -> ProvisioningConfig {
    ProvisioningConfig {
        prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
        special_list: special.iter().map(|s| s.to_string()).collect(),
        query_list: vec![],
        match_mode: MatchMode::Exact,
    }
}

fn provisioner(server: &MockServer, config: &ProvisioningConfig) -> Provisioner<ClusterClient> {
    let client = ClusterClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    Provisioner::new(
        Arc::new(client),
        config,
        RetryPolicy::new(3, Duration::from_millis(50)),
    )
}

#[tokio::test]
async fn test_missing_index_created_with_default_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/logs20240615"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "settings": { "number_of_shards": 5, "refresh_interval": "30s" },
            "mappings": { "properties": {
                "timestamp": { "type": "date", "format": "epoch_millis" }
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("indexes/created.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["logs"], &[]))
        .provision(today())
        .await;

    assert!(matches!(
        report.get("logs20240615").unwrap().outcome,
        ProvisionOutcome::Created
    ));
}

#[tokio::test]
async fn test_special_index_gets_send_timestamp_mapping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/metrics20240615"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/metrics20240615"))
        .and(body_partial_json(json!({
            "mappings": { "properties": {
                "sendTimeStamp": { "type": "date", "format": "epoch_millis" }
            }}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["metrics"], &["metrics"]))
        .provision(today())
        .await;

    assert_eq!(report.count("created"), 1);
}

#[tokio::test]
async fn test_existing_index_gets_no_put() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["logs"], &[]))
        .provision(today())
        .await;

    assert_eq!(report.count("exists"), 1);
}

#[tokio::test]
async fn test_conflict_response_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/logs20240615"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(load_fixture("indexes/already_exists.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["logs"], &[]))
        .provision(today())
        .await;

    assert_eq!(report.count("conflict_resolved"), 1);
    assert_eq!(report.failures(), 0);
}

#[tokio::test]
async fn test_failing_existence_check_never_creates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["logs"], &[]))
        .provision(today())
        .await;

    assert_eq!(report.count("existence_check_failed"), 1);
}

#[tokio::test]
async fn test_rejected_mapping_retried_then_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/logs20240615"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(load_fixture("indexes/invalid_mapping.json")),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let report = provisioner(&mock_server, &config(&["logs"], &[]))
        .provision(today())
        .await;

    let entry = report.get("logs20240615").unwrap();
    match &entry.outcome {
        ProvisionOutcome::FailedAfterRetries(e) => assert_eq!(e.status(), Some(400)),
        other => panic!("Expected FailedAfterRetries, got {:?}", other),
    }
}

#[tokio::test]
async fn test_credentials_from_config_sent_as_basic_auth() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    let port: u16 = uri.rsplit(':').next().unwrap().parse().unwrap();

    Mock::given(method("HEAD"))
        .and(path("/logs20240615"))
        .and(basic_auth("elastic", "changeme"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut full = autoindex_config::Config::for_host("127.0.0.1", port);
    full.connection.username = Some("elastic".to_string());
    full.connection.password = Some(SecretString::new("changeme".into()));
    full.provisioning = config(&["logs"], &[]);

    let client = ClusterClient::builder().from_config(&full).build().unwrap();
    let report = Provisioner::new(Arc::new(client), &full.provisioning, full.retry.into())
        .provision(today())
        .await;

    assert_eq!(report.count("exists"), 1);
}
