//! Upload paths for preparing backends.
//!
//! The vector index gets chunked, embedded records; the pongo API takes
//! whole transcripts and chunks them server-side. Both walk the same
//! transcripts directory and derive document identity from file names.

use super::chunker::{chunk_lines, document_title, transcript_files};
use crate::config::{PongoSettings, VectorIndexSettings};
use crate::embedding::Embedder;
use crate::error::{RagmarkError, Result};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use url::Url;
use uuid::Uuid;

/// Vectors per upsert request.
const UPSERT_BATCH_SIZE: usize = 100;

/// Counts reported after an upload run.
#[derive(Debug, Clone, Copy)]
pub struct UploadSummary {
    pub files: usize,
    pub records: usize,
}

/// Chunks, embeds, and upserts transcripts into the vector index.
pub struct VectorUploader {
    client: reqwest::Client,
    upsert_url: Url,
    api_key: String,
    approx_chunk_size: usize,
    embedder: Arc<dyn Embedder>,
}

impl VectorUploader {
    pub fn new(
        settings: &VectorIndexSettings,
        approx_chunk_size: usize,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let host = Url::parse(&settings.host)
            .map_err(|e| RagmarkError::Config(format!("Invalid vector_index.host: {}", e)))?;
        let upsert_url = host
            .join("vectors/upsert")
            .map_err(|e| RagmarkError::Config(format!("Invalid vector_index.host: {}", e)))?;

        Ok(Self {
            client: crate::backend::http_client()?,
            upsert_url,
            api_key: settings.api_key.clone(),
            approx_chunk_size,
            embedder,
        })
    }

    /// Upload every `.txt` transcript in the directory.
    pub async fn upload_directory(&self, dir: &Path) -> Result<UploadSummary> {
        let mut summary = UploadSummary {
            files: 0,
            records: 0,
        };

        for path in transcript_files(dir)? {
            eprintln!("  Uploading {}", path.display());
            summary.records += self.upload_file(&path).await?;
            summary.files += 1;
        }

        Ok(summary)
    }

    /// Chunk, embed, and upsert one transcript. Returns records written.
    pub async fn upload_file(&self, path: &Path) -> Result<usize> {
        let title = document_title(path)?;
        let content = std::fs::read_to_string(path)?;
        let lines: Vec<String> = content.lines().map(String::from).collect();

        let chunks = chunk_lines(&title, &lines, self.approx_chunk_size);
        let texts: Vec<String> = chunks.iter().map(|c| c.render()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let records: Vec<serde_json::Value> = texts
            .iter()
            .zip(embeddings)
            .map(|(text, values)| {
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "values": values,
                    "metadata": { "text": text, "title": title },
                })
            })
            .collect();

        for batch in records.chunks(UPSERT_BATCH_SIZE) {
            let response = self
                .client
                .post(self.upsert_url.clone())
                .header("Api-Key", &self.api_key)
                .json(&json!({ "vectors": batch }))
                .send()
                .await
                .map_err(|e| RagmarkError::BackendUnavailable {
                    backend: "vector".to_string(),
                    detail: e.to_string(),
                })?;

            if !response.status().is_success() {
                return Err(RagmarkError::BackendUnavailable {
                    backend: "vector".to_string(),
                    detail: format!("upsert returned status {}", response.status()),
                });
            }
        }

        info!("Upserted {} records for {}", records.len(), title);
        Ok(records.len())
    }
}

/// Uploads whole transcripts to the pongo API, scoped to a sub-organization.
pub struct PongoUploader {
    client: reqwest::Client,
    upload_url: Url,
    secret_key: String,
    sub_org_id: String,
}

impl PongoUploader {
    pub fn new(settings: &PongoSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|e| RagmarkError::Config(format!("Invalid pongo.endpoint: {}", e)))?;
        let upload_url = endpoint
            .join("api/v1/upload")
            .map_err(|e| RagmarkError::Config(format!("Invalid pongo.endpoint: {}", e)))?;

        Ok(Self {
            client: crate::backend::http_client()?,
            upload_url,
            secret_key: settings.secret_key.clone(),
            sub_org_id: settings.sub_org_id.clone(),
        })
    }

    /// Upload every `.txt` transcript in the directory.
    pub async fn upload_directory(&self, dir: &Path) -> Result<UploadSummary> {
        let mut summary = UploadSummary {
            files: 0,
            records: 0,
        };

        for path in transcript_files(dir)? {
            let title = document_title(&path)?;
            let data = std::fs::read_to_string(&path)?;

            let response = self
                .client
                .post(self.upload_url.clone())
                .header("secret", &self.secret_key)
                .json(&json!({
                    "data": data,
                    "metadata": {
                        "data_group": "podcast",
                        "parent_id": title,
                        "source": title,
                    },
                    "sub_org_id": self.sub_org_id,
                }))
                .send()
                .await
                .map_err(|e| RagmarkError::BackendUnavailable {
                    backend: "pongo".to_string(),
                    detail: e.to_string(),
                })?;

            if !response.status().is_success() {
                return Err(RagmarkError::BackendUnavailable {
                    backend: "pongo".to_string(),
                    detail: format!(
                        "upload of '{}' returned status {}",
                        title,
                        response.status()
                    ),
                });
            }

            eprintln!("  Uploaded {}", title);
            summary.files += 1;
            summary.records += 1;
        }

        Ok(summary)
    }
}
