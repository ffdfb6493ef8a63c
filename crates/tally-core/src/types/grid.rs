//! Grid display metadata.

use serde::{Deserialize, Serialize};

/// Default bucket width for block-ranged facets.
pub const DEFAULT_BLOCK_SIZE: u64 = 100_000;

/// Default grid width for block-ranged facets.
pub const DEFAULT_BLOCK_COLUMNS: usize = 20;

/// Bucket width for time-ranged facets (seconds in a day).
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Grid width for time-ranged and export facets.
pub const DEFAULT_TIME_COLUMNS: usize = 4;

/// Display metadata for a bucket grid.
///
/// `bucket_count` tracks the longest series in the owning `Buckets`;
/// `rows` is derived from it and `columns`. `max_block` only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridInfo {
    /// Number of grid rows, `ceil(bucket_count / columns)`.
    pub rows: usize,
    /// Fixed display width.
    pub columns: usize,
    /// Highest last block seen by any update.
    pub max_block: u64,
    /// Blocks (or seconds) spanned by one dense bucket.
    pub size: u64,
    /// Length of the longest series.
    pub bucket_count: usize,
}

impl Default for GridInfo {
    fn default() -> Self {
        Self::block_grid()
    }
}

impl GridInfo {
    /// Grid for block-ranged facets: 100000-block buckets, 20 columns.
    #[must_use]
    pub fn block_grid() -> Self {
        Self::with_layout(DEFAULT_BLOCK_SIZE, DEFAULT_BLOCK_COLUMNS)
    }

    /// Grid for time-ranged and export facets: one-day buckets, 4 columns.
    #[must_use]
    pub fn time_grid() -> Self {
        Self::with_layout(SECONDS_PER_DAY, DEFAULT_TIME_COLUMNS)
    }

    /// Creates an empty grid with the given bucket width and column count.
    #[must_use]
    pub fn with_layout(size: u64, columns: usize) -> Self {
        Self {
            rows: 0,
            columns,
            max_block: 0,
            size,
            bucket_count: 0,
        }
    }

    /// Records the current longest-series length and recomputes `rows`.
    pub fn set_bucket_count(&mut self, bucket_count: usize) {
        self.bucket_count = bucket_count;
        self.rows = if self.columns == 0 {
            0
        } else {
            bucket_count.div_ceil(self.columns)
        };
    }

    /// Raises `max_block` to `last_block` if it is higher.
    pub fn observe_block(&mut self, last_block: u64) {
        self.max_block = self.max_block.max(last_block);
    }
}
