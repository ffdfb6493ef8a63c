//! A single aggregation cell.

use serde::{Deserialize, Serialize};

/// Width of the zero-padded key given to block-indexed buckets.
///
/// Nine digits matches the padding used for block numbers in chunk ranges,
/// so lexicographic order of keys equals numeric order of indices.
pub const BLOCK_KEY_WIDTH: usize = 9;

/// One aggregation cell covering either a block range or a calendar day.
///
/// Block-indexed buckets carry their block span; day buckets carry a
/// `YYYYMMDD` key and a zero block span.
///
/// # Example
///
/// ```rust
/// use tally_core::types::Bucket;
///
/// let bucket = Bucket::for_block_index(3, 100_000);
/// assert_eq!(bucket.bucket_key, "000000003");
/// assert_eq!(bucket.start_block, 300_000);
/// assert_eq!(bucket.end_block, 399_999);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Zero-padded block-bucket index or `YYYYMMDD` day key.
    #[serde(rename = "bucketIndex", alias = "bucketKey")]
    pub bucket_key: String,
    /// First block covered (0 for day buckets).
    pub start_block: u64,
    /// Last block covered (0 for day buckets).
    pub end_block: u64,
    /// Accumulated metric value.
    pub total: f64,
    /// Secondary visual-encoding value, not computed by the engine.
    pub color_value: f64,
}

impl Bucket {
    /// Creates an empty bucket with the given key and block span.
    #[must_use]
    pub fn new(bucket_key: impl Into<String>, start_block: u64, end_block: u64) -> Self {
        Self {
            bucket_key: bucket_key.into(),
            start_block,
            end_block,
            total: 0.0,
            color_value: 0.0,
        }
    }

    /// Creates the empty bucket at position `index` of a dense grid whose
    /// buckets are `size` blocks wide.
    #[must_use]
    pub fn for_block_index(index: u64, size: u64) -> Self {
        let start = index.saturating_mul(size);
        let end = index
            .saturating_add(1)
            .saturating_mul(size)
            .saturating_sub(1)
            .max(start);
        Self::new(block_key(index), start, end)
    }

    /// Creates an empty day bucket. Day buckets carry no block span.
    #[must_use]
    pub fn for_day(day_key: impl Into<String>) -> Self {
        Self::new(day_key, 0, 0)
    }

    /// Creates a day bucket already holding `total`.
    #[must_use]
    pub fn day_with_total(day_key: impl Into<String>, total: f64) -> Self {
        Self {
            total,
            ..Self::for_day(day_key)
        }
    }

    /// Adds `value` to the accumulated total.
    pub fn add(&mut self, value: f64) {
        self.total += value;
    }
}

/// Formats a dense bucket index as its zero-padded key.
#[must_use]
pub fn block_key(index: u64) -> String {
    format!("{index:0width$}", width = BLOCK_KEY_WIDTH)
}
