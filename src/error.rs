//! Error types for benchlens
//!
//! Every public operation returns either a fully populated result or exactly one
//! of these errors. Nothing is retried internally: inputs are static, so a retry
//! without new data cannot change the outcome.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// benchlens error types
#[derive(Error, Debug)]
pub enum Error {
    /// Input is missing a required column, holds nulls, or is otherwise malformed
    #[error("Schema error: {0}")]
    Schema(String),

    /// Caller supplied an unsupported argument (e.g. an unknown outlier method)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No dataset matches the requested scenario or size
    #[error("Not found: {0}")]
    NotFound(String),

    /// Not enough distinct sizes to fit a scaling model
    #[error("Insufficient data: {0}\nCollect runs for more problem sizes and retry")]
    InsufficientData(String),

    /// Storage error (CSV/Parquet)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow/Parquet error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
