//! Template selection for an index name.
//!
//! The special list is consulted before the query list; anything unmatched
//! gets [`IndexTemplate::Default`]. Every name maps to exactly one template.

use autoindex_config::{MatchMode, ProvisioningConfig};

use crate::naming::IndexName;
use crate::template::IndexTemplate;

/// Picks the template for an index from the special and query lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    special: Vec<String>,
    query: Vec<String>,
    mode: MatchMode,
}

impl Classifier {
    /// Empty and whitespace-only entries are discarded.
    pub fn new(special: Vec<String>, query: Vec<String>, mode: MatchMode) -> Self {
        Self {
            special: clean(special),
            query: clean(query),
            mode,
        }
    }

    pub fn from_config(config: &ProvisioningConfig) -> Self {
        Self::new(
            config.special_list.clone(),
            config.query_list.clone(),
            config.match_mode,
        )
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn classify(&self, name: &IndexName) -> IndexTemplate {
        if self.matches(&self.special, name) {
            IndexTemplate::Special
        } else if self.matches(&self.query, name) {
            IndexTemplate::Query
        } else {
            IndexTemplate::Default
        }
    }

    fn matches(&self, list: &[String], name: &IndexName) -> bool {
        match self.mode {
            MatchMode::Exact => list.iter().any(|entry| entry == name.prefix()),
            MatchMode::Substring => {
                let full = name.to_string();
                list.iter().any(|entry| full.contains(entry.as_str()))
            }
        }
    }
}

fn clean(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}
