//! ragmark - RAG Retrieval Benchmark Harness
//!
//! Runs a fixed set of natural-language questions with known answers against
//! interchangeable retrieval backends, assembles the retrieved passages into
//! bounded context strings, and records (question, reference answer, context)
//! rows for later evaluation of answer quality.
//!
//! # Overview
//!
//! ragmark lets you:
//! - Benchmark retrieval quality across a vector index, a cloud search
//!   service, and a third-party RAG API with one pipeline
//! - Resume long runs by row offset against an append-only results file
//! - Chunk raw transcripts into upload-ready pieces
//! - Embed and upload chunks to the vector index
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `backend` - Retrieval backend abstraction and adapters
//! - `bench` - The benchmark pipeline (driver, assembler, retry, CSV I/O)
//! - `ingest` - Transcript chunking and upload paths
//! - `embedding` - Embedding generation
//!
//! # Example
//!
//! ```rust,no_run
//! use ragmark::backend::{create_backend, BackendKind};
//! use ragmark::bench::{BenchmarkDriver, QuestionReader, RunCursor};
//! use ragmark::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let (backend, profile) = create_backend(BackendKind::Pongo, &settings)?;
//!
//!     let driver = BenchmarkDriver::new(backend, profile, "results.csv".into());
//!     let questions = QuestionReader::open(settings.questions_path().as_path())?;
//!     let summary = driver.run(questions, RunCursor::new(0, 5000)).await?;
//!     println!("Processed {} questions", summary.processed);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod bench;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod ingest;

pub use error::{RagmarkError, Result};
