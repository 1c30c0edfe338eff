//! Ingest command implementation.

use crate::backend::{BackendKind, PongoBackend};
use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::ingest::{PongoUploader, VectorUploader};
use anyhow::Result;
use std::sync::Arc;

/// Upload transcripts to a backend's dataset.
pub async fn run_ingest(backend: &str, dir: Option<String>, settings: Settings) -> Result<()> {
    let kind: BackendKind = backend
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let dir = match dir {
        Some(d) => Settings::expand_path(&d),
        None => settings.transcripts_dir(),
    };

    match kind {
        BackendKind::Vector => {
            let embedder = Arc::new(OpenAIEmbedder::new(
                &settings.embedding.model,
                settings.embedding.dimensions as usize,
            ));
            let uploader = VectorUploader::new(
                &settings.vector_index,
                settings.chunking.approx_chunk_size,
                embedder,
            )?;

            Output::info(&format!(
                "Embedding and upserting transcripts from {}",
                dir.display()
            ));
            let summary = uploader.upload_directory(&dir).await?;
            Output::success(&format!(
                "Upserted {} records from {} transcripts",
                summary.records, summary.files
            ));
        }

        BackendKind::Pongo => {
            // Without a sub-org the upload has nowhere to land; list the
            // available ones so the user can pick.
            if settings.pongo.sub_org_id.is_empty() {
                let client = PongoBackend::new(&settings.pongo)?;
                Output::warning("pongo.sub_org_id is not set.");
                Output::header("Available sub-organizations");
                for org in client.list_sub_orgs().await? {
                    Output::list_item(&org.to_string());
                }
                Output::info("Set pongo.sub_org_id in the config file, then re-run.");
                return Ok(());
            }

            let uploader = PongoUploader::new(&settings.pongo)?;

            Output::info(&format!("Uploading transcripts from {}", dir.display()));
            let summary = uploader.upload_directory(&dir).await?;
            Output::success(&format!("Uploaded {} transcripts", summary.files));
        }

        BackendKind::Azure => {
            Output::error("The azure index is populated from blob storage; use 'ragmark chunk' and upload the chunk files.");
            anyhow::bail!("ingest is not supported for the azure backend");
        }
    }

    Ok(())
}
