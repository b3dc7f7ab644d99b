//! Test set module
//!
//! Records written for the evaluation harness and the mapping from source
//! rows to test cases.
//!
//! # Module Structure
//!
//! - `model`: `TestCase` / `TestSet` records and their JSON form
//! - `build`: Row → test-case mapping with skip rules

pub mod build;
pub mod model;

pub use build::{build_test_case, build_test_cases, BuildOutcome};
pub use model::{utc_timestamp, TestCase, TestSet};
