//! Domain error types
//!
//! This module defines the error hierarchy for anonymize-df.
//! Errors from polars and the standard library are converted at the boundary
//! so callers only ever match on [`AnonymizeError`].

use thiserror::Error;

/// Main anonymize-df error type
///
/// Every fallible operation of the library returns this error. Skipping an
/// operation because its column selector was left blank is not an error and
/// never produces one.
#[derive(Debug, Error)]
pub enum AnonymizeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested locale has no synthetic value source
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A named column does not exist in the dataset
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A numeric operation was requested on a column that does not hold numbers
    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// A present cell holds a number the operation cannot use
    #[error("Unusable number {value} in column '{column}' at row {row}")]
    UnusableNumber {
        column: String,
        row: usize,
        value: String,
    },

    /// A range generator was asked for an empty range
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },

    /// A range generator was given an infinite or NaN bound
    #[error("Range bound {0} is not a finite number")]
    NonFiniteBound(String),

    /// Gender labels are unusable (for example, both labels are identical)
    #[error("Invalid gender labels: {0}")]
    InvalidGenders(String),

    /// A row value has no entry in its own freshly built mapping.
    ///
    /// This is an internal invariant violation, never a data problem.
    #[error("Unmapped value in column '{column}' at row {row}")]
    UnmappedValue { column: String, row: usize },

    /// A synthetic column does not line up with its source column
    #[error("Length mismatch for column '{column}': expected {expected} rows, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Errors raised by the dataframe engine
    #[error("Dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnonymizeError {
    /// Returns true for errors that indicate a defect in this crate rather
    /// than in the caller's input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AnonymizeError::UnmappedValue { .. } | AnonymizeError::LengthMismatch { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AnonymizeError {
    fn from(err: std::io::Error) -> Self {
        AnonymizeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AnonymizeError {
    fn from(err: serde_json::Error) -> Self {
        AnonymizeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AnonymizeError {
    fn from(err: toml::de::Error) -> Self {
        AnonymizeError::Configuration(format!("TOML parse error: {err}"))
    }
}
