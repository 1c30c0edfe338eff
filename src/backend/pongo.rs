//! Pongo RAG API backend adapter.
//!
//! Pongo scopes uploaded data into sub-organizations; searches run against
//! the sub-organization configured for the dataset.

use super::{http_client, passage_from_value, Passage, RetrievalBackend};
use crate::config::PongoSettings;
use crate::error::{RagmarkError, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Retrieval backend over the Pongo search API.
pub struct PongoBackend {
    client: reqwest::Client,
    endpoint: Url,
    secret_key: String,
    sub_org_id: String,
    text_field: String,
}

impl PongoBackend {
    pub fn new(settings: &PongoSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|e| RagmarkError::Config(format!("Invalid pongo.endpoint: {}", e)))?;

        Ok(Self {
            client: http_client()?,
            endpoint,
            secret_key: settings.secret_key.clone(),
            sub_org_id: settings.sub_org_id.clone(),
            text_field: settings.text_field.clone(),
        })
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| RagmarkError::Config(format!("Invalid pongo API path: {}", e)))
    }

    /// List the sub-organizations visible to this key.
    ///
    /// Used at setup time when no sub-organization is configured yet.
    pub async fn list_sub_orgs(&self) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.api_url("api/v1/sub_orgs")?)
            .header("secret", &self.secret_key)
            .send()
            .await
            .map_err(|e| RagmarkError::BackendUnavailable {
                backend: "pongo".to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RagmarkError::BackendUnavailable {
                backend: "pongo".to_string(),
                detail: format!("sub_orgs returned status {}", response.status()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            RagmarkError::BackendProtocol(format!("pongo response is not valid JSON: {}", e))
        })?;

        match body {
            Value::Array(orgs) => Ok(orgs),
            other => Ok(vec![other]),
        }
    }
}

#[async_trait]
impl RetrievalBackend for PongoBackend {
    fn name(&self) -> &str {
        "pongo"
    }

    async fn search(&self, query: &str) -> Result<Vec<Passage>> {
        debug!("Searching pongo sub-org {} for: {}", self.sub_org_id, query);

        let response = self
            .client
            .get(self.api_url("api/v1/search")?)
            .header("secret", &self.secret_key)
            .query(&[("query", query), ("sub_org_id", &self.sub_org_id)])
            .send()
            .await
            .map_err(|e| RagmarkError::BackendUnavailable {
                backend: "pongo".to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RagmarkError::BackendUnavailable {
                backend: "pongo".to_string(),
                detail: format!("search returned status {}", response.status()),
            });
        }

        let docs: Vec<Value> = response.json().await.map_err(|e| {
            RagmarkError::BackendProtocol(format!("pongo response is not a JSON array: {}", e))
        })?;

        docs.iter()
            .map(|doc| passage_from_value(doc, &self.text_field, "pongo"))
            .collect()
    }
}
