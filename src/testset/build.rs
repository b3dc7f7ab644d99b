//! Row to test-case mapping

use crate::config::TestSetIdentity;
use crate::dataset::Row;
use crate::testset::TestCase;
use tracing::debug;

/// Test cases produced from a set of rows
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    /// Test cases in source row order
    pub tests: Vec<TestCase>,
    /// Rows without a question or an answer
    pub skipped: usize,
}

/// Build the test case for the row at zero-based `index`.
///
/// Returns `None` when the question or the answer is missing or empty.
pub fn build_test_case(identity: &TestSetIdentity, index: usize, row: &Row) -> Option<TestCase> {
    let (question, answer) = row.question_and_answer()?;
    Some(TestCase::new(identity, index, question, answer))
}

/// Map every row to a test case, skipping incomplete rows.
///
/// Numbering comes from each row's position in `rows`, so a skipped row
/// leaves a gap instead of shifting later ids.
pub fn build_test_cases(identity: &TestSetIdentity, rows: &[Row]) -> BuildOutcome {
    let mut outcome = BuildOutcome {
        tests: Vec::with_capacity(rows.len()),
        skipped: 0,
    };

    for (index, row) in rows.iter().enumerate() {
        match build_test_case(identity, index, row) {
            Some(test) => outcome.tests.push(test),
            None => outcome.skipped += 1,
        }
    }

    debug!(
        tests = outcome.tests.len(),
        skipped = outcome.skipped,
        "Built test cases"
    );

    outcome
}
