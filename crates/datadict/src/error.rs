//! Error types for the datadict library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datadict operations.
#[derive(Debug, Error)]
pub enum DictError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error (config or glossary documents).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Input that cannot be profiled (empty table, ragged columns, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Results were requested for a dataset that was never processed.
    #[error("No {kind} found for dataset: {dataset}")]
    NotFound { kind: &'static str, dataset: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error writing or reading exported artifacts.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DictError {
    pub(crate) fn not_found(kind: &'static str, dataset: impl Into<String>) -> Self {
        DictError::NotFound {
            kind,
            dataset: dataset.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DictError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for datadict operations.
pub type Result<T> = std::result::Result<T, DictError>;
