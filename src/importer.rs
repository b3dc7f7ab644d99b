//! Import pipeline
//!
//! One linear pass: load file → check store liveness → build test cases →
//! assemble the test set → persist → report.
//!
//! The store is only contacted after the file has loaded, and only written
//! after the whole test set exists in memory. The store value is owned by
//! [`Importer::run`] and dropped (closing the connection) on every return
//! path.

use crate::config::ImportConfig;
use crate::dataset::{load_dataset, Dataset};
use crate::error::{ConnectionError, Result};
use crate::store::{persist_payload, PersistOutcome, RedisStore, StoreConfig, TestSetStore};
use crate::testset::{build_test_cases, TestSet};
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Progress notifications, in the order they occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    /// About to read the source file
    Reading { path: PathBuf },
    /// Source file loaded
    Loaded {
        rows: usize,
        columns: Vec<String>,
        file_size: u64,
    },
    /// Store answered the liveness check
    Connected { url: String },
    /// Test set assembled in memory
    Transformed {
        tests: usize,
        skipped: usize,
        payload_bytes: usize,
    },
    /// Both keys written
    Persisted(PersistOutcome),
}

/// Result of a completed import
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub test_set_id: String,
    /// Rows in the source file
    pub total_rows: usize,
    /// Test cases written
    pub imported: usize,
    /// Rows without a question or an answer
    pub skipped: usize,
    /// Serialized test set size
    pub payload_bytes: usize,
    /// Keys written; `None` for a dry run
    pub persisted: Option<PersistOutcome>,
    pub duration: Duration,
}

/// Runs one import described by an [`ImportConfig`]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import into Redis
    pub fn run_redis<F>(&self, on_event: F) -> Result<ImportSummary>
    where
        F: FnMut(ImportEvent),
    {
        self.run(RedisStore::connect, on_event)
    }

    /// Import into the store returned by `connect`.
    ///
    /// `connect` is not called if the source file fails to load. Nothing is
    /// written if `connect` or the liveness check fails.
    pub fn run<S, C, F>(&self, connect: C, mut on_event: F) -> Result<ImportSummary>
    where
        S: TestSetStore,
        C: FnOnce(&StoreConfig) -> std::result::Result<S, ConnectionError>,
        F: FnMut(ImportEvent),
    {
        let start = Instant::now();
        let dataset = self.load(&mut on_event)?;

        let url = self.config.store.url();
        debug!(url = %url, "Connecting to store");
        let mut store = connect(&self.config.store)?;
        store.ping()?;
        info!(url = %url, "Store is reachable");
        on_event(ImportEvent::Connected { url });

        let (test_set, skipped, payload) = self.assemble(&dataset, &mut on_event)?;
        let outcome = persist_payload(
            &mut store,
            &self.config.store.keyspace(),
            &test_set.id,
            &payload,
        )?;
        on_event(ImportEvent::Persisted(outcome.clone()));

        let summary = ImportSummary {
            test_set_id: test_set.id,
            total_rows: dataset.num_rows(),
            imported: test_set.tests.len(),
            skipped,
            payload_bytes: payload.len(),
            persisted: Some(outcome),
            duration: start.elapsed(),
        };

        info!(
            test_set = %summary.test_set_id,
            imported = summary.imported,
            skipped = summary.skipped,
            "Import complete"
        );

        Ok(summary)
    }

    /// Load and transform without touching any store
    pub fn dry_run<F>(&self, mut on_event: F) -> Result<ImportSummary>
    where
        F: FnMut(ImportEvent),
    {
        let start = Instant::now();
        let dataset = self.load(&mut on_event)?;
        let (test_set, skipped, payload) = self.assemble(&dataset, &mut on_event)?;

        info!(
            test_set = %test_set.id,
            tests = test_set.tests.len(),
            "Dry run complete, nothing written"
        );

        Ok(ImportSummary {
            test_set_id: test_set.id,
            total_rows: dataset.num_rows(),
            imported: test_set.tests.len(),
            skipped,
            payload_bytes: payload.len(),
            persisted: None,
            duration: start.elapsed(),
        })
    }

    fn load<F>(&self, on_event: &mut F) -> Result<Dataset>
    where
        F: FnMut(ImportEvent),
    {
        on_event(ImportEvent::Reading {
            path: self.config.source.path.clone(),
        });

        let dataset = load_dataset(&self.config.source)?;
        on_event(ImportEvent::Loaded {
            rows: dataset.num_rows(),
            columns: dataset.columns.clone(),
            file_size: dataset.file_size,
        });

        Ok(dataset)
    }

    /// Build the test set and serialize it once for both sizing and writing
    fn assemble<F>(&self, dataset: &Dataset, on_event: &mut F) -> Result<(TestSet, usize, String)>
    where
        F: FnMut(ImportEvent),
    {
        let built = build_test_cases(&self.config.test_set, &dataset.rows);
        let test_set = TestSet::new(&self.config.test_set, built.tests, Utc::now());
        let payload = test_set.to_json()?;

        on_event(ImportEvent::Transformed {
            tests: test_set.tests.len(),
            skipped: built.skipped,
            payload_bytes: payload.len(),
        });

        Ok((test_set, built.skipped, payload))
    }
}
