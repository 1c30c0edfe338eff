//! Query and chunk embedding for the vector backend.
//!
//! The vector index stores and matches raw vectors, so both sides of it —
//! the benchmark's query path and ingestion's upload path — go through one
//! embedding seam.

mod openai;

pub use openai::OpenAIEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one query text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of chunk texts, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
