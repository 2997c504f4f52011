//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

#[allow(unused_imports)]
pub use autoindex_client::testing::load_fixture;

#[allow(unused_imports)]
pub use autoindex_client::endpoints;
#[allow(unused_imports)]
pub use autoindex_client::{ClientError, Credentials, CreateOutcome};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Per-call timeout used by tests that do not exercise timeouts.
#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Minimal settings/mappings body.
#[allow(dead_code)]
pub fn sample_body() -> String {
    serde_json::json!({
        "settings": { "number_of_shards": 1 },
        "mappings": { "properties": { "timestamp": { "type": "date", "format": "epoch_millis" } } }
    })
    .to_string()
}
