//! Block range parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// An inclusive `[first, last]` block range.
///
/// # Example
///
/// ```rust
/// use tally_core::BlockRange;
///
/// let range: BlockRange = "000100000-000249999".parse().unwrap();
/// assert_eq!(range.first, 100_000);
/// assert_eq!(range.last, 249_999);
/// assert_eq!(range.bucket_indices(100_000), (1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    /// First block, inclusive.
    pub first: u64,
    /// Last block, inclusive.
    pub last: u64,
}

impl BlockRange {
    /// Creates a range, rejecting `first > last`.
    pub fn new(first: u64, last: u64) -> CoreResult<Self> {
        if first > last {
            return Err(CoreError::invalid_range(
                format!("{first}-{last}"),
                "first block is after last block",
            ));
        }
        Ok(Self { first, last })
    }

    /// Parses a `first-last` string of decimal block numbers.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let (first, last) = input
            .split_once('-')
            .ok_or_else(|| CoreError::invalid_range(input, "expected 'first-last'"))?;

        let first = parse_block(input, first, "first")?;
        let last = parse_block(input, last, "last")?;
        Self::new(first, last).map_err(|_| {
            CoreError::invalid_range(input, "first block is after last block")
        })
    }

    /// Indices of the first and last dense buckets this range overlaps
    /// when buckets are `size` blocks wide. A zero size is treated as one.
    #[must_use]
    pub fn bucket_indices(&self, size: u64) -> (u64, u64) {
        let size = size.max(1);
        (self.first / size, self.last / size)
    }
}

fn parse_block(input: &str, part: &str, which: &str) -> CoreResult<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_range(
            input,
            format!("{which} block is not a number"),
        ));
    }
    part.parse::<u64>()
        .map_err(|e| CoreError::invalid_range(input, format!("{which} block: {e}")))
}

impl FromStr for BlockRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}-{:09}", self.first, self.last)
    }
}
