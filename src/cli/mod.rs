//! CLI module for ragmark.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ragmark - RAG retrieval benchmark harness
///
/// Runs a fixed set of questions against interchangeable retrieval backends
/// and records (question, answer, context) rows for later evaluation.
#[derive(Parser, Debug)]
#[command(name = "ragmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the retrieval benchmark against one backend
    Run {
        /// Backend to query (vector, azure, pongo)
        #[arg(short, long)]
        backend: String,

        /// Questions CSV (overrides the configured path)
        #[arg(short, long)]
        input: Option<String>,

        /// Results CSV (overrides the configured results directory)
        #[arg(short, long)]
        output: Option<String>,

        /// Datapoint index to resume from (skips rows below it)
        #[arg(short, long)]
        start: Option<usize>,

        /// Maximum number of datapoints to process
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Split transcript files into upload-ready chunks
    Chunk {
        /// Directory of transcript .txt files
        #[arg(short, long)]
        dir: Option<String>,

        /// Approximate chunk size in characters
        #[arg(short = 's', long)]
        chunk_size: Option<usize>,
    },

    /// Upload transcripts to a backend's dataset
    Ingest {
        /// Backend to upload to (vector, pongo)
        #[arg(short, long)]
        backend: String,

        /// Directory of transcript .txt files
        #[arg(short, long)]
        dir: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
