//! [`IndexApi`] for [`ClusterClient`].
//!
//! Each method performs exactly one HTTP call through [`crate::endpoints`].

use crate::client::{ClusterClient, IndexApi};
use crate::endpoints;
use crate::error::Result;
use crate::models::CreateOutcome;

impl IndexApi for ClusterClient {
    async fn index_exists(&self, name: &str) -> Result<bool> {
        endpoints::index_exists(
            &self.http,
            &self.base_url,
            &self.credentials,
            name,
            self.timeout,
            self.metrics.as_ref(),
        )
        .await
    }

    async fn create_index(&self, name: &str, body: &str) -> Result<CreateOutcome> {
        endpoints::create_index(
            &self.http,
            &self.base_url,
            &self.credentials,
            name,
            body,
            self.timeout,
            self.metrics.as_ref(),
        )
        .await
    }
}
