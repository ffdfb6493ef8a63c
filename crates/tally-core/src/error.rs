//! Error types for the Tally core.
//!
//! Parsing a block range or a calendar date is the only fallible step in
//! the core. Callers at the facet boundary log these and skip the update.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A `first-last` block range string could not be parsed.
    #[error("Invalid block range '{input}': {reason}")]
    InvalidRange {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A calendar date string could not be parsed.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A Unix timestamp falls outside the representable calendar.
    #[error("Timestamp out of range: {timestamp}")]
    TimestampOutOfRange {
        /// The offending timestamp in seconds.
        timestamp: i64,
    },
}

impl CoreError {
    /// Creates an invalid range error.
    #[must_use]
    pub fn invalid_range(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
