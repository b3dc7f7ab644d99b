//! Source dataset module
//!
//! Loads a Parquet file fully into memory and exposes the two columns the
//! importer consumes.
//!
//! # Module Structure
//!
//! - `reader`: Parquet → in-memory [`Dataset`] loading

pub mod reader;

pub use reader::load_dataset;

/// One source row, reduced to the fields the importer consumes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub question: Option<String>,
    pub answer: Option<String>,
}

impl Row {
    pub fn new(question: Option<&str>, answer: Option<&str>) -> Self {
        Self {
            question: question.map(str::to_string),
            answer: answer.map(str::to_string),
        }
    }

    /// Question and answer, if both are present and non-empty
    pub fn question_and_answer(&self) -> Option<(&str, &str)> {
        let question = self.question.as_deref().filter(|q| !q.is_empty())?;
        let answer = self.answer.as_deref().filter(|a| !a.is_empty())?;
        Some((question, answer))
    }
}

/// A loaded source file
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Every column in the file, in schema order
    pub columns: Vec<String>,
    /// Rows in file order
    pub rows: Vec<Row>,
    /// Size of the file on disk
    pub file_size: u64,
}

impl Dataset {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_and_answer() {
        assert_eq!(
            Row::new(Some("q"), Some("a")).question_and_answer(),
            Some(("q", "a"))
        );
        assert_eq!(Row::new(Some("q"), None).question_and_answer(), None);
        assert_eq!(Row::new(None, Some("a")).question_and_answer(), None);
        assert_eq!(Row::new(Some(""), Some("a")).question_and_answer(), None);
        assert_eq!(Row::default().question_and_answer(), None);
    }
}
