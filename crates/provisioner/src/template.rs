//! Index templates applied at creation.
//!
//! Every template shares the same settings and differs only in the name of
//! its epoch-millis timestamp field.

use std::fmt;

use serde_json::{Value, json};

const NUMBER_OF_SHARDS: u32 = 5;
const NUMBER_OF_REPLICAS: u32 = 1;
const REFRESH_INTERVAL: &str = "30s";
const TRANSLOG_FLUSH_THRESHOLD_SIZE: &str = "512m";
const TRANSLOG_DURABILITY: &str = "async";

const TIMESTAMP_TYPE: &str = "date";
const TIMESTAMP_FORMAT: &str = "epoch_millis";

/// Settings and mappings document used when creating an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexTemplate {
    /// Maps `timestamp`.
    #[default]
    Default,
    /// Maps `sendTimeStamp`.
    Special,
    /// Maps `queryTimeStamp`.
    Query,
}

impl IndexTemplate {
    pub const ALL: [IndexTemplate; 3] = [
        IndexTemplate::Default,
        IndexTemplate::Special,
        IndexTemplate::Query,
    ];

    /// Name of the date field this template maps.
    pub const fn timestamp_field(&self) -> &'static str {
        match self {
            IndexTemplate::Default => "timestamp",
            IndexTemplate::Special => "sendTimeStamp",
            IndexTemplate::Query => "queryTimeStamp",
        }
    }

    /// Label used in logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexTemplate::Default => "default",
            IndexTemplate::Special => "special",
            IndexTemplate::Query => "query",
        }
    }

    /// The settings/mappings document.
    pub fn document(&self) -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            self.timestamp_field().to_string(),
            json!({ "type": TIMESTAMP_TYPE, "format": TIMESTAMP_FORMAT }),
        );

        json!({
            "settings": {
                "number_of_shards": NUMBER_OF_SHARDS,
                "number_of_replicas": NUMBER_OF_REPLICAS,
                "refresh_interval": REFRESH_INTERVAL,
                "translog": {
                    "flush_threshold_size": TRANSLOG_FLUSH_THRESHOLD_SIZE,
                    "durability": TRANSLOG_DURABILITY,
                }
            },
            "mappings": {
                "properties": properties
            }
        })
    }

    /// The document serialized as a request body.
    pub fn body(&self) -> String {
        self.document().to_string()
    }
}

impl fmt::Display for IndexTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
