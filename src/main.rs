//! ragmark CLI entry point.

use anyhow::Result;
use clap::Parser;
use ragmark::cli::{commands, Cli, Commands};
use ragmark::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ragmark={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Run {
            backend,
            input,
            output,
            start,
            max,
        } => {
            commands::run_benchmark(
                backend,
                input.clone(),
                output.clone(),
                *start,
                *max,
                settings,
            )
            .await?;
        }

        Commands::Chunk { dir, chunk_size } => {
            commands::run_chunk(dir.clone(), *chunk_size, settings)?;
        }

        Commands::Ingest { backend, dir } => {
            commands::run_ingest(backend, dir.clone(), settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
