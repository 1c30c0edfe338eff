//! Vector index backend adapter.
//!
//! Embeds the query text, then runs a nearest-neighbor query against a
//! Pinecone-style index host. The passage text lives in each match's
//! metadata under the configured field.

use super::{http_client, passage_from_value, Passage, RetrievalBackend};
use crate::config::VectorIndexSettings;
use crate::embedding::Embedder;
use crate::error::{RagmarkError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Retrieval backend over an embedding model plus a remote vector index.
pub struct VectorIndexBackend {
    client: reqwest::Client,
    query_url: Url,
    api_key: String,
    top_k: usize,
    text_field: String,
    embedder: Arc<dyn Embedder>,
}

impl VectorIndexBackend {
    pub fn new(settings: &VectorIndexSettings, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let host = Url::parse(&settings.host)
            .map_err(|e| RagmarkError::Config(format!("Invalid vector_index.host: {}", e)))?;
        let query_url = host
            .join("query")
            .map_err(|e| RagmarkError::Config(format!("Invalid vector_index.host: {}", e)))?;

        Ok(Self {
            client: http_client()?,
            query_url,
            api_key: settings.api_key.clone(),
            top_k: settings.top_k,
            text_field: settings.text_field.clone(),
            embedder,
        })
    }
}

#[async_trait]
impl RetrievalBackend for VectorIndexBackend {
    fn name(&self) -> &str {
        "vector"
    }

    async fn search(&self, query: &str) -> Result<Vec<Passage>> {
        let vector = self.embedder.embed(query).await?;

        debug!("Querying vector index, top_k = {}", self.top_k);

        let response = self
            .client
            .post(self.query_url.clone())
            .header("Api-Key", &self.api_key)
            .json(&json!({
                "vector": vector,
                "topK": self.top_k,
                "includeMetadata": true,
            }))
            .send()
            .await
            .map_err(|e| RagmarkError::BackendUnavailable {
                backend: "vector".to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RagmarkError::BackendUnavailable {
                backend: "vector".to_string(),
                detail: format!("query returned status {}", response.status()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            RagmarkError::BackendProtocol(format!("vector index response is not valid JSON: {}", e))
        })?;

        let matches = body
            .get("matches")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                RagmarkError::BackendProtocol(
                    "vector index response has no 'matches' array".to_string(),
                )
            })?;

        // Matches come back ranked; the text lives in each match's metadata
        matches
            .iter()
            .map(|m| {
                let metadata = m.get("metadata").ok_or_else(|| {
                    RagmarkError::BackendProtocol(
                        "vector index match has no metadata".to_string(),
                    )
                })?;
                passage_from_value(metadata, &self.text_field, "vector")
            })
            .collect()
    }
}
