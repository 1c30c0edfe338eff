//! The retrieval benchmark pipeline.
//!
//! Reads (question, answer) pairs from a CSV, queries a retrieval backend
//! for each question, assembles the retrieved passages into one bounded
//! context string, and appends (question, answer, context) rows to an
//! append-only results CSV. Single-threaded and sequential: one question is
//! fully resolved before the next begins, so output row order matches input
//! row order and the results file has exactly one writer.

pub mod context;
pub mod driver;
pub mod questions;
pub mod results;
pub mod retry;

pub use context::ContextAssembler;
pub use driver::{BenchmarkDriver, RunCursor, RunSummary};
pub use questions::{Question, QuestionReader};
pub use results::{ResultRecord, ResultWriter};
pub use retry::RetryPolicy;
