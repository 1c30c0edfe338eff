//! Run command implementation.

use crate::backend::{create_backend, BackendKind};
use crate::bench::{BenchmarkDriver, QuestionReader, RunCursor};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the benchmark against one backend.
pub async fn run_benchmark(
    backend: &str,
    input: Option<String>,
    output: Option<String>,
    start: Option<usize>,
    max: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let kind: BackendKind = backend
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let questions_path = match input {
        Some(p) => Settings::expand_path(&p),
        None => settings.questions_path(),
    };
    let results_path = match output {
        Some(p) => Settings::expand_path(&p),
        None => settings
            .results_dir()
            .join(format!("{}-benchmark-results.csv", kind)),
    };

    let starting_index = start.unwrap_or(settings.benchmark.starting_index);
    let max_datapoints = max.unwrap_or(settings.benchmark.max_datapoints);

    let (backend, profile) = create_backend(kind, &settings)?;

    Output::info(&format!("Running {} benchmark", kind));
    Output::kv("questions", &questions_path.display().to_string());
    Output::kv("results", &results_path.display().to_string());
    if starting_index > 0 {
        Output::kv("resuming from", &starting_index.to_string());
    }

    let driver = BenchmarkDriver::new(backend, profile, results_path);
    let questions = QuestionReader::open(&questions_path)?;
    let cursor = RunCursor::new(starting_index, max_datapoints);

    match driver.run(questions, cursor).await {
        Ok(summary) => {
            if summary.reached_cap {
                Output::info(&format!(
                    "Stopped at the datapoint cap ({})",
                    max_datapoints
                ));
            }
            Output::success(&format!(
                "Benchmark complete: {} processed, {} skipped",
                summary.processed, summary.skipped
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Benchmark aborted: {}", e));
            Output::info("Rows written before the failure are durable; re-run with --start to resume.");
            Err(e.into())
        }
    }
}
