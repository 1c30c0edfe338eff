//! Benchmark driver: orchestrates the read → search → assemble → write loop.

use super::context::ContextAssembler;
use super::questions::QuestionReader;
use super::results::{ResultRecord, ResultWriter};
use super::retry::RetryPolicy;
use crate::backend::{RetrievalBackend, RunProfile};
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Progress notice interval, in processed datapoints.
const PROGRESS_INTERVAL: usize = 10;

/// Position state for one run.
///
/// `current_index` advances by exactly one per datapoint, including skipped
/// ones, so that `starting_index` lines up with the row count of a previous
/// run's output. Resumption is caller-supplied: the driver never reads the
/// results file to infer where to pick up.
#[derive(Debug, Clone, Copy)]
pub struct RunCursor {
    pub starting_index: usize,
    pub current_index: usize,
    pub max_datapoints: usize,
}

impl RunCursor {
    pub fn new(starting_index: usize, max_datapoints: usize) -> Self {
        Self {
            starting_index,
            current_index: 0,
            max_datapoints,
        }
    }

    fn reached_cap(&self) -> bool {
        self.current_index >= self.max_datapoints
    }

    fn advance(&mut self) {
        self.current_index += 1;
    }
}

/// Outcome of a completed (non-aborted) run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Datapoints searched, assembled, and written this run.
    pub processed: usize,
    /// Datapoints skipped below the starting index.
    pub skipped: usize,
    /// Whether the run stopped at the datapoint cap rather than exhausting
    /// the source. A normal stop either way.
    pub reached_cap: bool,
}

/// Drives one benchmark run against one backend.
///
/// Per datapoint, in row order: search (retry-wrapped when the backend's
/// profile says so), assemble the bounded context, and append the result
/// row. Fatal errors abort the run; rows appended before the abort stay
/// durable and a later run can resume past them with a starting index.
pub struct BenchmarkDriver {
    backend: Arc<dyn RetrievalBackend>,
    profile: RunProfile,
    assembler: ContextAssembler,
    retry: RetryPolicy,
    results_path: PathBuf,
}

impl BenchmarkDriver {
    pub fn new(
        backend: Arc<dyn RetrievalBackend>,
        profile: RunProfile,
        results_path: PathBuf,
    ) -> Self {
        let mut assembler = ContextAssembler::new(profile.max_context_chars);
        if let Some(max_sources) = profile.max_sources {
            assembler = assembler.with_max_sources(max_sources);
        }

        Self {
            backend,
            profile,
            assembler,
            retry: RetryPolicy::new(),
            results_path,
        }
    }

    /// Override the retry policy (tests use a zero delay).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Run the benchmark to completion, the datapoint cap, or the first
    /// fatal error.
    pub async fn run(&self, questions: QuestionReader, mut cursor: RunCursor) -> Result<RunSummary> {
        if ResultWriter::ensure_initialized(&self.results_path, &self.profile.answer_header)? {
            info!("Created results file {}", self.results_path.display());
        } else {
            info!(
                "Results file {} exists, appending",
                self.results_path.display()
            );
        }
        let mut writer = ResultWriter::open_append(&self.results_path)?;

        let mut summary = RunSummary {
            processed: 0,
            skipped: 0,
            reached_cap: false,
        };

        for row in questions.records() {
            if cursor.reached_cap() {
                info!(
                    "Reached maximum datapoints ({}), stopping",
                    cursor.max_datapoints
                );
                summary.reached_cap = true;
                break;
            }

            if cursor.current_index % PROGRESS_INTERVAL == 0 {
                eprintln!("  Processing datapoint index: {}", cursor.current_index);
            }

            if cursor.current_index < cursor.starting_index {
                cursor.advance();
                summary.skipped += 1;
                continue;
            }

            let question = row.inspect_err(|e| {
                error!("Aborting at datapoint {}: input read failed: {}", cursor.current_index, e);
            })?;

            let searched = if self.profile.retry_transient {
                self.retry
                    .call(|| self.backend.search(&question.question))
                    .await
            } else {
                self.backend.search(&question.question).await
            };
            let passages = searched.inspect_err(|e| {
                error!(
                    "Aborting at datapoint {}: {} search failed: {}",
                    cursor.current_index,
                    self.backend.name(),
                    e
                );
            })?;

            let context = self.assembler.assemble(&passages);
            let recorded = if self.profile.record_full_prompt {
                format_prompt(&question.question, &context)
            } else {
                context
            };

            writer
                .append(&ResultRecord {
                    question: question.question,
                    answer: question.answer,
                    context: recorded,
                })
                .inspect_err(|e| {
                    error!("Aborting at datapoint {}: result write failed: {}", cursor.current_index, e);
                })?;

            cursor.advance();
            summary.processed += 1;
        }

        info!(
            "Run complete: {} processed, {} skipped",
            summary.processed, summary.skipped
        );
        Ok(summary)
    }
}

/// The full prompt string some backends record in place of the bare context.
fn format_prompt(question: &str, context: &str) -> String {
    format!(
        "Please use ONLY the sources at the bottom of this prompt to give a short, concise answer the following question.\n\nQuestion: \"{}\"{}",
        question, context
    )
}
