//! Checkpointed result writing.

use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

/// One output row of a benchmark run.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub question: String,
    pub answer: String,
    /// The assembled context, or the full prompt string for backends that
    /// record one.
    pub context: String,
}

/// Append-only writer for the results CSV.
///
/// Every appended row is flushed immediately, so a crash after N rows leaves
/// exactly N durable rows — which is what lets a later run resume by passing
/// N as its starting index. The writer never rewrites or truncates an
/// existing file.
pub struct ResultWriter {
    writer: csv::Writer<File>,
}

impl ResultWriter {
    /// Create the results file with its header row iff it does not exist.
    ///
    /// Idempotent: a no-op (not an error) when the file is already there.
    /// Returns whether the file was created. The answer column header varies
    /// by backend profile (`answer` or `true_answer`).
    pub fn ensure_initialized(path: &Path, answer_header: &str) -> Result<bool> {
        if path.exists() {
            debug!("Results file {} already exists", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_writer(File::create(path)?);
        writer.write_record(["question", answer_header, "context"])?;
        writer.flush()?;
        Ok(true)
    }

    /// Open the results file for appending.
    pub fn open_append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file),
        })
    }

    /// Append one row and flush it to disk.
    pub fn append(&mut self, record: &ResultRecord) -> Result<()> {
        self.writer
            .write_record([&record.question, &record.answer, &record.context])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn initialization_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        assert!(ResultWriter::ensure_initialized(&path, "answer").unwrap());
        assert!(!ResultWriter::ensure_initialized(&path, "answer").unwrap());

        let lines = read_lines(&path);
        assert_eq!(lines, vec!["question,answer,context"]);
    }

    #[test]
    fn header_variant_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        ResultWriter::ensure_initialized(&path, "true_answer").unwrap();
        assert_eq!(read_lines(&path), vec!["question,true_answer,context"]);
    }

    #[test]
    fn appends_without_rewriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        ResultWriter::ensure_initialized(&path, "answer").unwrap();

        {
            let mut writer = ResultWriter::open_append(&path).unwrap();
            writer
                .append(&ResultRecord {
                    question: "q1".to_string(),
                    answer: "a1".to_string(),
                    context: "c1".to_string(),
                })
                .unwrap();
        }

        // A second writer (a new process, in effect) appends after the
        // first run's rows without touching them.
        ResultWriter::ensure_initialized(&path, "answer").unwrap();
        {
            let mut writer = ResultWriter::open_append(&path).unwrap();
            writer
                .append(&ResultRecord {
                    question: "q2".to_string(),
                    answer: "a2".to_string(),
                    context: "c2".to_string(),
                })
                .unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "question,answer,context");
        assert_eq!(lines[1], "q1,a1,c1");
        assert_eq!(lines[2], "q2,a2,c2");
    }

    #[test]
    fn rows_with_commas_and_quotes_are_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        ResultWriter::ensure_initialized(&path, "answer").unwrap();

        let mut writer = ResultWriter::open_append(&path).unwrap();
        writer
            .append(&ResultRecord {
                question: "Who founded Acme, Inc.?".to_string(),
                answer: "Jane".to_string(),
                context: "Source #1: \n\"text\"".to_string(),
            })
            .unwrap();
        drop(writer);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Who founded Acme, Inc.?");
        assert_eq!(&row[2], "Source #1: \n\"text\"");
    }
}
