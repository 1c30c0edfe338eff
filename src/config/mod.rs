//! Configuration module for ragmark.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    AzureSearchSettings, BenchmarkSettings, ChunkingSettings, EmbeddingSettings,
    GeneralSettings, PongoSettings, ProfileSettings, Settings, VectorIndexSettings,
};
