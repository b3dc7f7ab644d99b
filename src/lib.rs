//! testset-importer - Benchmark dataset → evaluation test set
//!
//! Turns a benchmark dataset stored as Parquet (for example the GSM8k test
//! split) into a test set for an evaluation harness, stored as JSON in Redis.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────────┐
//! │  Parquet file    │  question / answer columns
//! └────────┬─────────┘
//!          │ load fully into memory
//!          ▼
//! ┌──────────────────┐      PING      ┌──────────────────┐
//! │    Importer      │ ─────────────▶ │      Redis       │
//! │  - skip rows     │                │                  │
//! │    missing Q/A   │  SADD + SET    │ sz:test_sets     │
//! │  - TestCase per  │ ─────────────▶ │ sz:test_set:<id> │
//! │    row index     │                │                  │
//! └──────────────────┘                └──────────────────┘
//! ```
//!
//! Test case ids and names come from each row's position in the file, so a
//! skipped row leaves a gap (`GSM8k-T0`, `GSM8k-T2`, ...). Re-running an
//! import replaces the stored payload and leaves a single index entry.
//!
//! # Example
//!
//! ```bash
//! # Import into the default Redis (localhost:6380)
//! testset-importer test-00000-of-00001.parquet
//!
//! # Inspect the result
//! redis-cli -p 6380 GET sz:test_set:GSM8k | jq '.tests | length'
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod importer;
pub mod progress;
pub mod store;
pub mod testset;

pub use config::{CliArgs, ImportConfig, SourceConfig, TestSetIdentity};
pub use error::{ImportError, Result};
pub use importer::{ImportEvent, ImportSummary, Importer};
pub use store::{Keyspace, MemoryStore, RedisStore, StoreConfig, TestSetStore};
pub use testset::{TestCase, TestSet};
