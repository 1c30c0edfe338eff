//! Azure Cognitive Search backend adapter.

use super::{http_client, passage_from_value, Passage, RetrievalBackend};
use crate::config::AzureSearchSettings;
use crate::error::{RagmarkError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

const API_VERSION: &str = "2023-11-01";

/// Retrieval backend over the Azure Cognitive Search REST API.
pub struct AzureSearchBackend {
    client: reqwest::Client,
    search_url: Url,
    api_key: String,
    top: usize,
    text_field: String,
}

impl AzureSearchBackend {
    pub fn new(settings: &AzureSearchSettings) -> Result<Self> {
        let base = Url::parse(&settings.endpoint)
            .map_err(|e| RagmarkError::Config(format!("Invalid azure_search.endpoint: {}", e)))?;
        let search_url = base
            .join(&format!(
                "indexes/{}/docs/search?api-version={}",
                settings.index, API_VERSION
            ))
            .map_err(|e| RagmarkError::Config(format!("Invalid azure_search.index: {}", e)))?;

        Ok(Self {
            client: http_client()?,
            search_url,
            api_key: settings.api_key.clone(),
            top: settings.top,
            text_field: settings.text_field.clone(),
        })
    }
}

#[async_trait]
impl RetrievalBackend for AzureSearchBackend {
    fn name(&self) -> &str {
        "azure"
    }

    async fn search(&self, query: &str) -> Result<Vec<Passage>> {
        debug!("Searching Azure index for: {}", query);

        let response = self
            .client
            .post(self.search_url.clone())
            .header("api-key", &self.api_key)
            .json(&json!({ "search": query, "top": self.top }))
            .send()
            .await
            .map_err(|e| RagmarkError::BackendUnavailable {
                backend: "azure".to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RagmarkError::BackendUnavailable {
                backend: "azure".to_string(),
                detail: format!("search returned status {}", response.status()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            RagmarkError::BackendProtocol(format!("azure response is not valid JSON: {}", e))
        })?;

        let docs = body
            .get("value")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                RagmarkError::BackendProtocol("azure response has no 'value' array".to_string())
            })?;

        docs.iter()
            .map(|doc| passage_from_value(doc, &self.text_field, "azure"))
            .collect()
    }
}
