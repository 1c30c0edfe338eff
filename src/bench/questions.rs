//! Question source reading.

use crate::error::{RagmarkError, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// One benchmark datapoint: a question and its reference answer.
///
/// Identity is row position in the source file, not content; duplicate
/// questions are processed like any other row.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
}

/// Lazy, row-order reader over the questions CSV.
///
/// The source is treated as static for the duration of a run; reopening the
/// same path reproduces the same sequence, which is what makes resumption by
/// row offset sound. Rows are not reordered, deduplicated, or validated for
/// emptiness — a row missing an expected column fails with
/// [`RagmarkError::MalformedRow`].
pub struct QuestionReader {
    reader: csv::Reader<File>,
}

impl QuestionReader {
    /// Open the questions file. Expects a header row with at least
    /// `question` and `answer` columns.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            RagmarkError::InvalidInput(format!(
                "Cannot open questions file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            reader: csv::Reader::from_reader(file),
        })
    }

    /// Iterate questions in file order.
    pub fn records(self) -> impl Iterator<Item = Result<Question>> {
        self.reader.into_deserialize::<Question>().map(|row| {
            row.map_err(|e| {
                if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) {
                    RagmarkError::MalformedRow(e.to_string())
                } else {
                    RagmarkError::Csv(e)
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rows_in_file_order() {
        let file = write_csv("question,answer\nWhat is X?,It is Y.\nWhat is Z?,Nobody knows.\n");

        let questions: Vec<Question> = QuestionReader::open(file.path())
            .unwrap()
            .records()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "What is X?");
        assert_eq!(questions[0].answer, "It is Y.");
        assert_eq!(questions[1].question, "What is Z?");
    }

    #[test]
    fn quoted_fields_with_commas_survive() {
        let file = write_csv("question,answer\n\"Who founded Acme, Inc.?\",\"Jane, in 1999\"\n");

        let questions: Vec<Question> = QuestionReader::open(file.path())
            .unwrap()
            .records()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(questions[0].question, "Who founded Acme, Inc.?");
        assert_eq!(questions[0].answer, "Jane, in 1999");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_csv("id,question,answer\n1,What is X?,It is Y.\n");

        let questions: Vec<Question> = QuestionReader::open(file.path())
            .unwrap()
            .records()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(questions[0].question, "What is X?");
    }

    #[test]
    fn missing_answer_column_is_malformed() {
        let file = write_csv("question,response\nWhat is X?,It is Y.\n");

        let result: Result<Vec<Question>> =
            QuestionReader::open(file.path()).unwrap().records().collect();

        assert!(matches!(result, Err(RagmarkError::MalformedRow(_))));
    }

    #[test]
    fn reopening_reproduces_the_sequence() {
        let file = write_csv("question,answer\nq1,a1\nq2,a2\n");

        let first: Vec<String> = QuestionReader::open(file.path())
            .unwrap()
            .records()
            .map(|q| q.unwrap().question)
            .collect();
        let second: Vec<String> = QuestionReader::open(file.path())
            .unwrap()
            .records()
            .map(|q| q.unwrap().question)
            .collect();

        assert_eq!(first, second);
    }
}
