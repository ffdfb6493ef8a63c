//! Bucket grid value types.
//!
//! - [`Bucket`]: One aggregation cell (block range or calendar day)
//! - [`BucketStats`]: Summary fold over a series
//! - [`GridInfo`]: Grid display metadata
//! - [`Buckets`]: Named series, legacy positional series, and grid metadata

mod bucket;
mod buckets;
mod grid;
mod stats;

pub use bucket::{block_key, Bucket, BLOCK_KEY_WIDTH};
pub use buckets::{Buckets, LEGACY_SERIES_COUNT};
pub use grid::{
    GridInfo, DEFAULT_BLOCK_COLUMNS, DEFAULT_BLOCK_SIZE, DEFAULT_TIME_COLUMNS, SECONDS_PER_DAY,
};
pub use stats::BucketStats;
