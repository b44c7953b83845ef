//! Error types for the record model.

use thiserror::Error;

/// A specialized Result type for model conversions.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building records from raw reminder data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A priority string did not name a known bucket.
    #[error("invalid priority: {value} (expected none, low, medium or high)")]
    InvalidPriority {
        /// The rejected priority value.
        value: String,
    },

    /// A reminder carried a date that is not valid ISO-8601.
    #[error("invalid {field} on reminder '{id}': {value}")]
    InvalidDate {
        /// The reminder ID.
        id: String,
        /// Which date attribute was malformed.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A reminder is missing its identifier.
    #[error("reminder is missing an id")]
    MissingId,
}

impl ModelError {
    /// Creates an invalid priority error.
    pub fn invalid_priority(value: impl Into<String>) -> Self {
        ModelError::InvalidPriority {
            value: value.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(id: impl Into<String>, field: &'static str, value: impl Into<String>) -> Self {
        ModelError::InvalidDate {
            id: id.into(),
            field,
            value: value.into(),
        }
    }
}
