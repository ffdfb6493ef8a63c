//! Error types for bucket updates.
//!
//! Every error here is raised before the target `Buckets` is touched, so a
//! failed update leaves prior state exactly as it was.

use tally_core::CoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a bucket update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Range or date parsing failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A date range ends before it starts.
    #[error("Date range is reversed: {first} is after {last}")]
    ReversedDates {
        /// First date as given.
        first: String,
        /// Last date as given.
        last: String,
    },

    /// The range would need more buckets than a dense series may hold.
    #[error("Bucket index {index} exceeds the dense grid limit")]
    GridTooLarge {
        /// The offending bucket index.
        index: u64,
    },
}

impl EngineError {
    /// Creates a reversed date range error.
    #[must_use]
    pub fn reversed_dates(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self::ReversedDates {
            first: first.into(),
            last: last.into(),
        }
    }
}
