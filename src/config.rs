//! Configuration types for testset-importer
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//!
//! Every fixed value of an import (source path, store address, test-set
//! identity, column names) lives in [`ImportConfig`], which is passed into the
//! importer explicitly so tests can substitute their own.

use crate::error::ConfigError;
use crate::store::StoreConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default source file name (the GSM8k test split)
pub const DEFAULT_SOURCE_FILE: &str = "test-00000-of-00001.parquet";

/// Default Redis host
pub const DEFAULT_REDIS_HOST: &str = "localhost";

/// Default Redis port
pub const DEFAULT_REDIS_PORT: u16 = 6380;

/// Default keyspace namespace
pub const DEFAULT_KEY_PREFIX: &str = "sz";

/// Default test-set identifier
pub const DEFAULT_TEST_SET_ID: &str = "GSM8k";

/// Default test-set display name
pub const DEFAULT_TEST_SET_NAME: &str = "GSM8k Benchmark";

/// Default test-set description
pub const DEFAULT_TEST_SET_DESCRIPTION: &str = "Grade School Math 8k Test Set";

/// Default test-case display-name prefix
pub const DEFAULT_CASE_PREFIX: &str = "GSM8k";

/// Default prompt column
pub const DEFAULT_QUESTION_COLUMN: &str = "question";

/// Default expected-response column
pub const DEFAULT_ANSWER_COLUMN: &str = "answer";

/// Import a benchmark dataset from Parquet into a Redis test set
#[derive(Parser, Debug, Clone)]
#[command(
    name = "testset-importer",
    version,
    about = "Import a benchmark dataset from Parquet into a Redis test set",
    long_about = "Reads a Parquet dataset fully into memory, turns every row with a question \
                  and an answer into a test case, and stores the resulting test set as JSON \
                  in Redis.\n\n\
                  The test-set id is added to the '<prefix>:test_sets' set and the payload is \
                  written to '<prefix>:test_set:<id>', replacing any previous import.",
    after_help = "EXAMPLES:\n    \
        testset-importer test-00000-of-00001.parquet\n    \
        testset-importer data.parquet --redis-host redis.local --redis-port 6379\n    \
        testset-importer data.parquet --id MATH --name 'MATH Benchmark' --case-prefix MATH\n    \
        testset-importer data.parquet --dry-run  # load and transform only"
)]
pub struct CliArgs {
    /// Parquet file to import
    #[arg(value_name = "FILE", env = "IMPORT_FILE", default_value = DEFAULT_SOURCE_FILE)]
    pub file: PathBuf,

    /// Redis host
    #[arg(long, env = "REDIS_HOST", default_value = DEFAULT_REDIS_HOST, value_name = "HOST")]
    pub redis_host: String,

    /// Redis port
    #[arg(long, env = "REDIS_PORT", default_value_t = DEFAULT_REDIS_PORT, value_name = "PORT")]
    pub redis_port: u16,

    /// Namespace prefix for store keys
    #[arg(long, default_value = DEFAULT_KEY_PREFIX, value_name = "PREFIX")]
    pub key_prefix: String,

    /// Redis connect timeout in seconds
    #[arg(long, default_value = "5", value_name = "SECS")]
    pub connect_timeout: u64,

    /// Test-set identifier
    #[arg(long, default_value = DEFAULT_TEST_SET_ID, value_name = "ID")]
    pub id: String,

    /// Test-set display name
    #[arg(long, default_value = DEFAULT_TEST_SET_NAME, value_name = "NAME")]
    pub name: String,

    /// Test-set description
    #[arg(long, default_value = DEFAULT_TEST_SET_DESCRIPTION, value_name = "TEXT")]
    pub description: String,

    /// Prefix for test-case display names ("<prefix> #<n>")
    #[arg(long, default_value = DEFAULT_CASE_PREFIX, value_name = "PREFIX")]
    pub case_prefix: String,

    /// Column holding the prompt text
    #[arg(long, default_value = DEFAULT_QUESTION_COLUMN, value_name = "COLUMN")]
    pub question_column: String,

    /// Column holding the expected response
    #[arg(long, default_value = DEFAULT_ANSWER_COLUMN, value_name = "COLUMN")]
    pub answer_column: String,

    /// Load and transform without connecting to Redis
    #[arg(long)]
    pub dry_run: bool,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Where to read rows from
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Parquet file path
    pub path: PathBuf,

    /// Column read as the test-case prompt
    pub question_column: String,

    /// Column read as the expected response
    pub answer_column: String,
}

impl SourceConfig {
    /// Source with the default column names
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            question_column: DEFAULT_QUESTION_COLUMN.to_string(),
            answer_column: DEFAULT_ANSWER_COLUMN.to_string(),
        }
    }
}

/// Fixed identity of the test set being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSetIdentity {
    /// Identifier, also used in store keys and test-case ids
    pub id: String,

    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// Prefix for test-case display names
    pub case_prefix: String,
}

impl Default for TestSetIdentity {
    fn default() -> Self {
        Self {
            id: DEFAULT_TEST_SET_ID.to_string(),
            name: DEFAULT_TEST_SET_NAME.to_string(),
            description: DEFAULT_TEST_SET_DESCRIPTION.to_string(),
            case_prefix: DEFAULT_CASE_PREFIX.to_string(),
        }
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Source file and columns
    pub source: SourceConfig,

    /// Test-set identity
    pub test_set: TestSetIdentity,

    /// Store connection and keyspace
    pub store: StoreConfig,

    /// Skip the store entirely
    pub dry_run: bool,

    /// Show progress output
    pub show_progress: bool,
}

impl ImportConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let config = Self {
            source: SourceConfig {
                path: args.file,
                question_column: args.question_column,
                answer_column: args.answer_column,
            },
            test_set: TestSetIdentity {
                id: args.id,
                name: args.name,
                description: args.description,
                case_prefix: args.case_prefix,
            },
            store: StoreConfig {
                host: args.redis_host,
                port: args.redis_port,
                key_prefix: args.key_prefix,
                connect_timeout: Duration::from_secs(args.connect_timeout),
            },
            dry_run: args.dry_run,
            show_progress: !args.quiet,
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for `path` with every other value at its default
    pub fn for_source(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceConfig::new(path),
            test_set: TestSetIdentity::default(),
            store: StoreConfig::default(),
            dry_run: false,
            show_progress: false,
        }
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("id", &self.test_set.id),
            ("name", &self.test_set.name),
            ("case-prefix", &self.test_set.case_prefix),
            ("question-column", &self.source.question_column),
            ("answer-column", &self.source.answer_column),
            ("redis-host", &self.store.host),
            ("key-prefix", &self.store.key_prefix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }

        if self.source.question_column == self.source.answer_column {
            return Err(ConfigError::SameColumn {
                column: self.source.question_column.clone(),
            });
        }

        if self.store.port == 0 {
            return Err(ConfigError::InvalidPort {
                port: self.store.port,
            });
        }

        if self.store.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["testset-importer"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_gsm8k_import() {
        let config = ImportConfig::from_args(parse(&["data.parquet"])).unwrap();
        assert_eq!(config.source.path, PathBuf::from("data.parquet"));
        assert_eq!(config.source.question_column, "question");
        assert_eq!(config.source.answer_column, "answer");
        assert_eq!(config.test_set.id, "GSM8k");
        assert_eq!(config.test_set.name, "GSM8k Benchmark");
        assert_eq!(config.test_set.description, "Grade School Math 8k Test Set");
        assert_eq!(config.test_set.case_prefix, "GSM8k");
        assert_eq!(config.store.key_prefix, "sz");
        assert!(config.show_progress);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_overrides() {
        let config = ImportConfig::from_args(parse(&[
            "math.parquet",
            "--redis-host",
            "redis.local",
            "--redis-port",
            "6379",
            "--id",
            "MATH",
            "--case-prefix",
            "MATH",
            "--question-column",
            "problem",
            "--answer-column",
            "solution",
            "-q",
            "--dry-run",
        ]))
        .unwrap();
        assert_eq!(config.store.url(), "redis://redis.local:6379/");
        assert_eq!(config.test_set.id, "MATH");
        assert_eq!(config.source.question_column, "problem");
        assert_eq!(config.source.answer_column, "solution");
        assert!(!config.show_progress);
        assert!(config.dry_run);
    }

    #[test]
    fn test_rejects_empty_id() {
        let err = ImportConfig::from_args(parse(&["data.parquet", "--id", ""])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty { field: "id" }));
    }

    #[test]
    fn test_rejects_same_column() {
        let err = ImportConfig::from_args(parse(&[
            "data.parquet",
            "--answer-column",
            "question",
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::SameColumn { .. }));
    }

    #[test]
    fn test_rejects_zero_port_and_timeout() {
        let err =
            ImportConfig::from_args(parse(&["data.parquet", "--redis-port", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { port: 0 }));

        let err = ImportConfig::from_args(parse(&["data.parquet", "--connect-timeout", "0"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_for_source_is_valid() {
        let config = ImportConfig::for_source("x.parquet");
        assert!(config.validate().is_ok());
        assert!(!config.show_progress);
    }
}
