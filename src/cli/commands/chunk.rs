//! Chunk command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::ingest::chunk_directory;
use anyhow::Result;

/// Split every transcript in a directory into upload-ready chunks.
pub fn run_chunk(dir: Option<String>, chunk_size: Option<usize>, settings: Settings) -> Result<()> {
    let dir = match dir {
        Some(d) => Settings::expand_path(&d),
        None => settings.transcripts_dir(),
    };
    let approx_chunk_size = chunk_size.unwrap_or(settings.chunking.approx_chunk_size);

    Output::info(&format!(
        "Chunking transcripts in {} (target {} chars)",
        dir.display(),
        approx_chunk_size
    ));

    match chunk_directory(&dir, approx_chunk_size) {
        Ok((files, chunks)) => {
            if files == 0 {
                Output::warning("No .txt transcripts found.");
            } else {
                Output::success(&format!(
                    "Wrote {} chunks from {} transcripts into {}",
                    chunks,
                    files,
                    dir.join("chunks").display()
                ));
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Chunking failed: {}", e));
            Err(e.into())
        }
    }
}
