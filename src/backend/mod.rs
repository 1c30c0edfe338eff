//! Retrieval backend abstraction.
//!
//! Every backend answers a free-text query with an ordered sequence of
//! passages, most relevant first. Mapping the native response shape onto
//! [`Passage`] is each adapter's sole responsibility; bounding the number
//! of passages is not — that belongs to the context assembler.

mod azure;
mod pongo;
mod vector;

pub use azure::AzureSearchBackend;
pub use pongo::PongoBackend;
pub use vector::VectorIndexBackend;

use crate::config::{ProfileSettings, Settings};
use crate::embedding::OpenAIEmbedder;
use crate::error::{RagmarkError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One retrieved unit of text plus whatever metadata the backend attached.
#[derive(Debug, Clone)]
pub struct Passage {
    /// Passage text.
    pub text: String,
    /// Backend-specific metadata (scores, source ids, titles).
    pub metadata: Map<String, Value>,
}

impl Passage {
    pub fn new(text: String) -> Self {
        Self {
            text,
            metadata: Map::new(),
        }
    }
}

/// Trait for retrieval backend implementations.
#[async_trait]
pub trait RetrievalBackend: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;

    /// Retrieve passages relevant to the query, most relevant first.
    async fn search(&self, query: &str) -> Result<Vec<Passage>>;
}

/// Which retrieval backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Embedding + vector index query.
    Vector,
    /// Azure Cognitive Search.
    Azure,
    /// Pongo RAG API.
    Pongo,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vector" | "pinecone" => Ok(BackendKind::Vector),
            "azure" => Ok(BackendKind::Azure),
            "pongo" => Ok(BackendKind::Pongo),
            _ => Err(format!("Unknown backend: {} (expected vector, azure, or pongo)", s)),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Vector => write!(f, "vector"),
            BackendKind::Azure => write!(f, "azure"),
            BackendKind::Pongo => write!(f, "pongo"),
        }
    }
}

/// How a benchmark run against one backend behaves: result file header,
/// context bounds, record shape, and retry wrapping. Comes from the
/// backend's settings so the driver stays backend-agnostic.
#[derive(Debug, Clone)]
pub struct RunProfile {
    /// Header for the answer column of the results file.
    pub answer_header: String,
    /// Maximum context length in characters.
    pub max_context_chars: usize,
    /// Maximum number of sources per context, if bounded.
    pub max_sources: Option<usize>,
    /// Record the full prompt string instead of the bare context.
    pub record_full_prompt: bool,
    /// Wrap search calls in the one-shot retry policy.
    pub retry_transient: bool,
}

impl From<&ProfileSettings> for RunProfile {
    fn from(p: &ProfileSettings) -> Self {
        Self {
            answer_header: p.answer_header.clone(),
            max_context_chars: p.max_context_chars,
            max_sources: p.max_sources,
            record_full_prompt: p.record_full_prompt,
            retry_transient: p.retry_transient,
        }
    }
}

/// Construct the requested backend and its run profile from settings.
///
/// Fails with a `Config` error naming the missing credential rather than
/// letting the first search call fail mid-run.
pub fn create_backend(
    kind: BackendKind,
    settings: &Settings,
) -> Result<(Arc<dyn RetrievalBackend>, RunProfile)> {
    match kind {
        BackendKind::Vector => {
            let cfg = &settings.vector_index;
            require(&cfg.host, "vector_index.host")?;
            require(&cfg.api_key, "vector_index.api_key")?;
            let embedder = Arc::new(OpenAIEmbedder::new(
                &settings.embedding.model,
                settings.embedding.dimensions as usize,
            ));
            let backend = VectorIndexBackend::new(cfg, embedder)?;
            Ok((Arc::new(backend), RunProfile::from(&cfg.profile)))
        }
        BackendKind::Azure => {
            let cfg = &settings.azure_search;
            require(&cfg.endpoint, "azure_search.endpoint")?;
            require(&cfg.index, "azure_search.index")?;
            require(&cfg.api_key, "azure_search.api_key")?;
            let backend = AzureSearchBackend::new(cfg)?;
            Ok((Arc::new(backend), RunProfile::from(&cfg.profile)))
        }
        BackendKind::Pongo => {
            let cfg = &settings.pongo;
            require(&cfg.secret_key, "pongo.secret_key")?;
            let backend = PongoBackend::new(cfg)?;
            Ok((Arc::new(backend), RunProfile::from(&cfg.profile)))
        }
    }
}

fn require(value: &str, key: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RagmarkError::Config(format!(
            "{} is not set; add it to the config file",
            key
        )));
    }
    Ok(())
}

/// Shared reqwest client for backend adapters.
pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(RagmarkError::Http)
}

/// Pull the passage text out of one response document.
///
/// The text field name varies by backend ("text", "content"); a document
/// without it cannot be mapped and is a protocol error, not a skip.
pub(crate) fn passage_from_value(doc: &Value, text_field: &str, backend: &str) -> Result<Passage> {
    let text = doc
        .get(text_field)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RagmarkError::BackendProtocol(format!(
                "{} response document has no '{}' text field",
                backend, text_field
            ))
        })?
        .to_string();

    let mut metadata = Map::new();
    if let Value::Object(fields) = doc {
        for (key, value) in fields {
            if key != text_field {
                metadata.insert(key.clone(), value.clone());
            }
        }
    }

    Ok(Passage { text, metadata })
}
