//! Error taxonomy shared by every read, write, and sort operation.
//!
//! Each variant carries enough structured context (row, column, expected and
//! actual values, engine names) for a caller to render a precise message.
//! Nothing in the library retries or degrades silently: a detected
//! inconsistency always surfaces as one of these variants.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::ScalarType;

pub type Result<T> = std::result::Result<T, TableError>;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("Unsupported file format '{file}'")]
    UnsupportedFormat { file: String },

    #[error("Could not determine the delimiter of '{file}' from its header line")]
    AmbiguousDelimiter { file: String },

    #[error("Line {line_number} has {actual} field(s) but the header declares {expected}")]
    RowWidthMismatch {
        line_number: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Row {row} of column '{column}' holds a {actual} value but the column type is {expected}"
    )]
    TypeMismatch {
        row: usize,
        column: String,
        expected: ScalarType,
        actual: ScalarType,
    },

    #[error("{context}: {message}")]
    IOFailure { context: String, message: String },

    #[error("Unknown spreadsheet engine '{name}' (expected 'bulk' or 'cell-walk')")]
    UnknownEngine { name: String },

    #[error("Column '{column}' has {actual} row(s) but {expected} were expected")]
    RowCountMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot write {value:?} (column '{column}', line {line_number}): it {reason}")]
    UnencodableValue {
        line_number: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("No column named '{name}'")]
    ColumnNotFound { name: String },

    #[error("No table available")]
    NullTable,
}

impl TableError {
    pub(crate) fn io(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        TableError::IOFailure {
            context: context.into(),
            message: err.to_string(),
        }
    }
}
