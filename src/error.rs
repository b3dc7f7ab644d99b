//! Error types for testset-importer
//!
//! This module defines the error hierarchy for a single import run:
//! - Loading the source Parquet file
//! - Connecting to the key-value store and checking liveness
//! - Writing the test set to the store
//! - Configuration validation
//!
//! Every variant of [`ImportError`] is terminal for the run. There are no
//! retries and nothing to roll back, because the store is only written after
//! the whole test set has been assembled in memory.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for an import run
#[derive(Error, Debug)]
pub enum ImportError {
    /// Source file could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Store unreachable or failed the liveness check
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Store write failed after connectivity was verified
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Test set could not be serialized
    #[error("Failed to serialize test set")]
    Serialization(#[from] serde_json::Error),
}

impl ImportError {
    /// Process exit code for this error.
    ///
    /// Load and connection failures get their own codes so calling
    /// automation can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            ImportError::Load(_) => 2,
            ImportError::Connection(_) => 3,
            _ => 1,
        }
    }
}

/// Source file errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// File does not exist
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// File exists but could not be opened
    #[error("Failed to open '{path}'")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid Parquet or a row group failed to decode
    #[error("Failed to read Parquet file '{path}'")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    /// Arrow batch could not be decoded
    #[error("Failed to decode record batch from '{path}'")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    /// Configured column is not present in the file
    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// Column exists but cannot be read as text
    #[error("Column '{column}' of type {data_type} cannot be read as text")]
    UnsupportedColumn { column: String, data_type: String },
}

/// Store connectivity errors
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Connection settings rejected by the client
    #[error("Invalid Redis address '{url}': {reason}")]
    InvalidAddress { url: String, reason: String },

    /// Could not open a connection
    #[error("Failed to connect to Redis at '{url}': {reason}")]
    Unreachable { url: String, reason: String },

    /// Connection opened but the PING round-trip failed
    #[error("Redis at '{url}' failed liveness check: {reason}")]
    LivenessFailed { url: String, reason: String },
}

/// Store write errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Adding the identifier to the index set failed
    #[error("Failed to add '{member}' to index '{key}': {reason}")]
    IndexFailed {
        key: String,
        member: String,
        reason: String,
    },

    /// Writing the payload failed
    #[error("Failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required value is empty
    #[error("'{field}' must not be empty")]
    Empty { field: &'static str },

    /// Question and answer point at the same column
    #[error("Question and answer columns must differ (both are '{column}')")]
    SameColumn { column: String },

    /// Port zero
    #[error("Invalid Redis port {port}")]
    InvalidPort { port: u16 },

    /// Connect timeout zero
    #[error("Connect timeout must be at least 1 second")]
    InvalidTimeout,
}

/// Result type alias for ImportError
pub type Result<T> = std::result::Result<T, ImportError>;

/// Result type alias for LoadError
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Result type alias for StoreError
pub type StoreResult<T> = std::result::Result<T, StoreError>;
