//! Ingestion: transcript chunking and backend upload paths.
//!
//! Independent of the benchmark pipeline; runs once to prepare a backend's
//! dataset before any benchmark run queries it.

pub mod chunker;
pub mod upload;

pub use chunker::{chunk_directory, chunk_file, chunk_lines, TranscriptChunk};
pub use upload::{PongoUploader, UploadSummary, VectorUploader};
