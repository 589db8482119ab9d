//! Error types for the data-loader crate.
//!
//! Only the input collaborators can fail. The sampling core works on
//! already-parsed records and never returns an error.

use thiserror::Error;

/// Errors that can occur while reading the item and rating tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File exists but could not be opened
    #[error("Failed to open file {path}: {source}")]
    FileOpen {
        path: String,
        source: std::io::Error,
    },

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row in a data file couldn't be parsed (strict mode only)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Row has fewer fields than the table requires (strict mode only)
    #[error("Expected at least {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
