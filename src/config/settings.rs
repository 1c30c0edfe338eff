//! Configuration settings for ragmark.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub benchmark: BenchmarkSettings,
    pub embedding: EmbeddingSettings,
    pub vector_index: VectorIndexSettings,
    pub azure_search: AzureSearchSettings,
    pub pongo: PongoSettings,
    pub chunking: ChunkingSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data (results, chunk output).
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.ragmark".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Benchmark run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSettings {
    /// Path to the questions CSV (columns: question, answer).
    pub questions_path: String,
    /// Directory where per-backend result CSVs are written.
    pub results_dir: String,
    /// Row index to resume from. Rows below this index are skipped,
    /// not re-processed; set it to the number of rows a prior run wrote.
    pub starting_index: usize,
    /// Maximum number of datapoints to process before stopping.
    pub max_datapoints: usize,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            questions_path: "questions.csv".to_string(),
            results_dir: "~/.ragmark/results".to_string(),
            starting_index: 0,
            max_datapoints: 5000,
        }
    }
}

/// Embedding generation settings (used by the vector backend and ingestion).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-large".to_string(),
            dimensions: 3072,
        }
    }
}

/// Per-backend run behavior: how results are recorded and whether
/// transient failures get the one-shot retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Header used for the answer column of the results file.
    pub answer_header: String,
    /// Maximum context length in characters (checked before each append,
    /// so the final context may overshoot by one passage).
    pub max_context_chars: usize,
    /// Maximum number of sources in a context (unbounded if absent).
    pub max_sources: Option<usize>,
    /// Record the full prompt string instead of the bare context.
    pub record_full_prompt: bool,
    /// Wrap search calls in the one-shot retry policy.
    pub retry_transient: bool,
}

/// Vector index backend settings (Pinecone-style REST API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexSettings {
    /// Index host URL, e.g. "https://my-index-abc123.svc.pinecone.io".
    pub host: String,
    /// API key for the index.
    pub api_key: String,
    /// Number of nearest neighbors to retrieve per query.
    pub top_k: usize,
    /// Metadata field holding the passage text.
    pub text_field: String,
    pub profile: ProfileSettings,
}

impl Default for VectorIndexSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            top_k: 10,
            text_field: "text".to_string(),
            profile: ProfileSettings {
                answer_header: "answer".to_string(),
                max_context_chars: 10_000,
                max_sources: None,
                record_full_prompt: false,
                retry_transient: false,
            },
        }
    }
}

/// Azure Cognitive Search backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureSearchSettings {
    /// Service endpoint, e.g. "https://my-service.search.windows.net".
    pub endpoint: String,
    /// Search index name.
    pub index: String,
    /// API key for the service.
    pub api_key: String,
    /// Number of documents to retrieve per query.
    pub top: usize,
    /// Document field holding the passage text.
    pub text_field: String,
    pub profile: ProfileSettings,
}

impl Default for AzureSearchSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            index: String::new(),
            api_key: String::new(),
            top: 10,
            text_field: "content".to_string(),
            profile: ProfileSettings {
                answer_header: "true_answer".to_string(),
                max_context_chars: 12_000,
                max_sources: Some(10),
                record_full_prompt: true,
                retry_transient: false,
            },
        }
    }
}

/// Pongo RAG API backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PongoSettings {
    /// API endpoint.
    pub endpoint: String,
    /// Secret key for authentication.
    pub secret_key: String,
    /// Sub-organization the dataset lives in.
    pub sub_org_id: String,
    /// Response field holding the passage text.
    pub text_field: String,
    pub profile: ProfileSettings,
}

impl Default for PongoSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.joinpongo.com".to_string(),
            secret_key: String::new(),
            sub_org_id: String::new(),
            text_field: "text".to_string(),
            profile: ProfileSettings {
                answer_header: "answer".to_string(),
                max_context_chars: 10_000,
                max_sources: None,
                record_full_prompt: false,
                retry_transient: true,
            },
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Directory of transcript .txt files.
    pub transcripts_dir: String,
    /// Approximate chunk size in characters.
    pub approx_chunk_size: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            transcripts_dir: "transcripts".to_string(),
            approx_chunk_size: 900,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::RagmarkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ragmark")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded results directory path.
    pub fn results_dir(&self) -> PathBuf {
        Self::expand_path(&self.benchmark.results_dir)
    }

    /// Get the expanded questions file path.
    pub fn questions_path(&self) -> PathBuf {
        Self::expand_path(&self.benchmark.questions_path)
    }

    /// Get the expanded transcripts directory path.
    pub fn transcripts_dir(&self) -> PathBuf {
        Self::expand_path(&self.chunking.transcripts_dir)
    }
}
