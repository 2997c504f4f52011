//! In-memory cluster used by provisioning tests.
//!
//! Records every call in order, and can be scripted to fail a given number
//! of existence checks or creations, to report a creation conflict, or to
//! delay every call.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use autoindex_client::{ClientError, CreateOutcome, IndexApi, Result};
use autoindex_config::{MatchMode, ProvisioningConfig};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Create { name: String, body: String },
}

#[derive(Default)]
struct State {
    existing: HashSet<String>,
    exists_failures: HashMap<String, usize>,
    create_failures: HashMap<String, usize>,
    conflicts: HashSet<String>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<State>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, name: &str) -> Self {
        self.state.lock().unwrap().existing.insert(name.to_string());
        self
    }

    /// Fail the next `times` existence checks for `name`.
    pub fn fail_exists(self, name: &str, times: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .exists_failures
            .insert(name.to_string(), times);
        self
    }

    /// Fail the next `times` creations of `name`.
    pub fn fail_create(self, name: &str, times: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .create_failures
            .insert(name.to_string(), times);
        self
    }

    /// Report "already exists" when `name` is created.
    pub fn conflict_on_create(self, name: &str) -> Self {
        self.state.lock().unwrap().conflicts.insert(name.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn exists_calls(&self, name: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Exists(n) if n == name))
            .count()
    }

    pub fn create_calls(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create { name, body } => Some((name, body)),
                Call::Exists(_) => None,
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().unwrap().existing.contains(name)
    }
}

fn unavailable(name: &str) -> ClientError {
    ClientError::ApiError {
        status: 503,
        url: format!("http://fake:9200/{name}"),
        message: "unavailable".to_string(),
    }
}

/// Consume one scripted failure for `name`, if any remain.
fn take_failure(failures: &mut HashMap<String, usize>, name: &str) -> bool {
    match failures.get_mut(name) {
        Some(remaining) if *remaining > 0 => {
            *remaining -= 1;
            true
        }
        _ => false,
    }
}

impl IndexApi for FakeCluster {
    async fn index_exists(&self, name: &str) -> Result<bool> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Exists(name.to_string()));
        if take_failure(&mut state.exists_failures, name) {
            return Err(unavailable(name));
        }
        Ok(state.existing.contains(name))
    }

    async fn create_index(&self, name: &str, body: &str) -> Result<CreateOutcome> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            name: name.to_string(),
            body: body.to_string(),
        });
        if take_failure(&mut state.create_failures, name) {
            return Err(unavailable(name));
        }
        if state.conflicts.contains(name) || state.existing.contains(name) {
            state.existing.insert(name.to_string());
            return Ok(CreateOutcome::AlreadyExists);
        }
        state.existing.insert(name.to_string());
        Ok(CreateOutcome::Created)
    }
}

#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
}

#[allow(dead_code)]
pub fn provisioning(prefixes: &[&str], special: &[&str], query: &[&str]) -> ProvisioningConfig {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    ProvisioningConfig {
        prefixes: strings(prefixes),
        special_list: strings(special),
        query_list: strings(query),
        match_mode: MatchMode::Exact,
    }
}

/// The single mapped field name in a create body.
#[allow(dead_code)]
pub fn mapped_field(body: &str) -> String {
    let doc: serde_json::Value = serde_json::from_str(body).unwrap();
    let properties = doc["mappings"]["properties"].as_object().unwrap();
    assert_eq!(properties.len(), 1);
    properties.keys().next().unwrap().clone()
}
