//! Data error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from table loading and split retrieval.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Data file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse data file: {0}")]
    Parse(#[from] arrow::error::ArrowError),

    #[error("Data file {path} holds no table")]
    EmptyFile { path: PathBuf },

    #[error("Column(s) not found: {}", columns.join(", "))]
    ColumnNotFound { columns: Vec<String> },

    #[error("Column {column} is not {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("Column {column} has unsupported type {datatype}")]
    UnsupportedColumnType { column: String, datatype: String },

    #[error("Column {column} contains null values")]
    NullValues { column: String },

    #[error("Column {column} has length {actual}, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl DataError {
    /// Shorthand for a single missing column.
    pub(crate) fn column_not_found<S: Into<String>>(column: S) -> Self {
        DataError::ColumnNotFound {
            columns: vec![column.into()],
        }
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
