//! Error types for ragmark.

use thiserror::Error;

/// Library-level error type for ragmark operations.
#[derive(Error, Debug)]
pub enum RagmarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend's transport or service reported a non-success status.
    /// Transient and eligible for the one-shot retry.
    #[error("Backend '{backend}' unavailable: {detail}")]
    BackendUnavailable { backend: String, detail: String },

    /// The backend responded, but the response could not be mapped onto
    /// passages (e.g. missing text field). Fatal, never retried.
    #[error("Backend protocol error: {0}")]
    BackendProtocol(String),

    /// Both attempts of a retry-wrapped call failed.
    #[error("Retry exhausted: {0}")]
    RetryExhausted(#[source] Box<RagmarkError>),

    /// Input table row missing an expected column.
    #[error("Malformed input row: {0}")]
    MalformedRow(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RagmarkError {
    /// Whether this failure is transient and may succeed on a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, RagmarkError::BackendUnavailable { .. })
    }
}

/// Result type alias for ragmark operations.
pub type Result<T> = std::result::Result<T, RagmarkError>;
