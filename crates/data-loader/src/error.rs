//! Error types for the data-loader crate.
//!
//! Every way a listing snapshot can fail to load ends up in
//! [`DataLoadError`]. Recoverable cell-level problems (bad times, missing
//! seat counts) never reach this type: they are normalised by the parser.

use thiserror::Error;

/// Errors that can occur while fetching, parsing or validating listings.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the source
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, wrong field count, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row couldn't be turned into a listing
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field held a value outside its allowed domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Snapshot-level validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Result type alias for data-loader operations.
pub type Result<T> = std::result::Result<T, DataLoadError>;
