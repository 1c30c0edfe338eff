//! Transcript chunking for ingestion.
//!
//! Splits a transcript into line-aligned chunks near a target character
//! size. Boundaries are a function only of cumulative raw line length —
//! no sentence or semantic splitting — which keeps the output stable
//! across runs for the same input.

use crate::error::{RagmarkError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the output subdirectory created next to the transcripts.
const CHUNKS_DIR: &str = "chunks";

/// One bounded, line-aligned slice of a source document.
#[derive(Debug, Clone)]
pub struct TranscriptChunk {
    /// Document title (the source file stem).
    pub title: String,
    /// The chunk's lines, in document order, without line terminators.
    pub lines: Vec<String>,
    /// Cumulative size of the lines (characters, counting one per line
    /// break). The header is not counted.
    pub approx_size_chars: usize,
}

impl TranscriptChunk {
    /// Render the chunk with its two-line header.
    pub fn render(&self) -> String {
        let mut out = format!("Title: {}\nBody:\n", self.title);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Split a document's lines into chunks of roughly `approx_chunk_size`
/// characters.
///
/// Lines accumulate into the running chunk; once the running count reaches
/// or exceeds the target *after* including the current line, the chunk is
/// closed with that line inside it and the next chunk starts from zero.
/// Every line lands in exactly one chunk and lines are never split, so the
/// chunks concatenated in order reproduce the document exactly. A final
/// partial chunk is emitted whenever it holds at least one line.
pub fn chunk_lines(title: &str, lines: &[String], approx_chunk_size: usize) -> Vec<TranscriptChunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut count = 0usize;

    for line in lines {
        count += line.chars().count() + 1;
        current.push(line.clone());

        if count >= approx_chunk_size {
            chunks.push(TranscriptChunk {
                title: title.to_string(),
                lines: std::mem::take(&mut current),
                approx_size_chars: count,
            });
            count = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(TranscriptChunk {
            title: title.to_string(),
            lines: current,
            approx_size_chars: count,
        });
    }

    chunks
}

/// Chunk one transcript file and write the chunks as
/// `chunks/<title>-<index>.txt` next to it. Returns the number of chunks
/// written.
pub fn chunk_file(path: &Path, approx_chunk_size: usize) -> Result<usize> {
    let title = document_title(path)?;
    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content.lines().map(String::from).collect();

    let out_dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CHUNKS_DIR);
    std::fs::create_dir_all(&out_dir)?;

    let chunks = chunk_lines(&title, &lines, approx_chunk_size);
    for (index, chunk) in chunks.iter().enumerate() {
        let chunk_path = out_dir.join(format!("{}-{}.txt", title, index));
        std::fs::write(&chunk_path, chunk.render())?;
        debug!("Wrote chunk {}", chunk_path.display());
    }

    Ok(chunks.len())
}

/// Chunk every `.txt` file in a directory. Returns (files, chunks) counts.
pub fn chunk_directory(dir: &Path, approx_chunk_size: usize) -> Result<(usize, usize)> {
    let mut files = 0;
    let mut total_chunks = 0;

    for path in transcript_files(dir)? {
        info!("Chunking {}", path.display());
        total_chunks += chunk_file(&path, approx_chunk_size)?;
        files += 1;
    }

    Ok((files, total_chunks))
}

/// The `.txt` files of a transcript directory, sorted by name.
pub fn transcript_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| {
            RagmarkError::InvalidInput(format!(
                "Cannot read transcripts directory {}: {}",
                dir.display(),
                e
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Document title: the file stem.
pub fn document_title(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| {
            RagmarkError::InvalidInput(format!("Cannot derive title from {}", path.display()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn triggering_line_closes_the_chunk() {
        // 10 chars per line (9 + newline); threshold 20 closes after two lines.
        let doc = lines(&["aaaaaaaaa", "bbbbbbbbb", "ccccccccc", "ddddddddd", "eeeeeeeee"]);
        let chunks = chunk_lines("ep", &doc, 20);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].lines, lines(&["aaaaaaaaa", "bbbbbbbbb"]));
        assert_eq!(chunks[1].lines, lines(&["ccccccccc", "ddddddddd"]));
        assert_eq!(chunks[2].lines, lines(&["eeeeeeeee"]));
        assert_eq!(chunks[0].approx_size_chars, 20);
        assert_eq!(chunks[2].approx_size_chars, 10);
    }

    #[test]
    fn round_trip_preserves_every_line() {
        let doc = lines(&["one", "two", "three", "four", "five", "six"]);
        let chunks = chunk_lines("ep", &doc, 9);

        let rejoined: Vec<String> = chunks.into_iter().flat_map(|c| c.lines).collect();
        assert_eq!(rejoined, doc);
    }

    #[test]
    fn single_short_document_is_one_partial_chunk() {
        let doc = lines(&["hello"]);
        let chunks = chunk_lines("ep", &doc, 900);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].lines, doc);
        assert_eq!(chunks[0].approx_size_chars, 6);
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        assert!(chunk_lines("ep", &[], 900).is_empty());
    }

    #[test]
    fn header_size_is_not_counted() {
        // A long title must not push lines over the threshold.
        let doc = lines(&["aaaa", "bbbb"]);
        let chunks = chunk_lines(&"t".repeat(500), &doc, 11);

        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn render_prefixes_two_line_header() {
        let chunks = chunk_lines("some-episode", &lines(&["line one", "line two"]), 900);
        let rendered = chunks[0].render();

        assert!(rendered.starts_with("Title: some-episode\nBody:\n"));
        assert!(rendered.ends_with("line one\nline two\n"));
    }

    #[test]
    fn chunk_file_writes_indexed_files() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = dir.path().join("episode-1.txt");
        std::fs::write(&transcript, "aaaaaaaaa\nbbbbbbbbb\nccccccccc\n").unwrap();

        let written = chunk_file(&transcript, 20).unwrap();
        assert_eq!(written, 2);

        let chunk0 = std::fs::read_to_string(dir.path().join("chunks/episode-1-0.txt")).unwrap();
        let chunk1 = std::fs::read_to_string(dir.path().join("chunks/episode-1-1.txt")).unwrap();
        assert!(chunk0.starts_with("Title: episode-1\nBody:\n"));
        assert!(chunk0.contains("aaaaaaaaa\nbbbbbbbbb"));
        assert!(chunk1.contains("ccccccccc"));
    }

    #[test]
    fn chunk_directory_skips_non_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "some text\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored\n").unwrap();

        let (files, chunks) = chunk_directory(dir.path(), 900).unwrap();
        assert_eq!(files, 1);
        assert_eq!(chunks, 1);
    }
}
