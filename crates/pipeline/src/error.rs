//! Error types for building filter criteria.
//!
//! Filtering itself cannot fail; only turning user input into
//! [`FilterCriteria`](crate::FilterCriteria) can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    /// A bucket or window label that isn't one of the known options
    #[error("Unknown {kind} {value:?} (expected one of: {expected})")]
    UnknownLabel {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// A range whose lower bound is above its upper bound
    #[error("Invalid {field} range: {lo} is greater than {hi}")]
    InvertedRange {
        field: &'static str,
        lo: String,
        hi: String,
    },
}

pub type Result<T> = std::result::Result<T, CriteriaError>;
