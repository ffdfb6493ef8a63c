//! The bucket container owned by a facet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Bucket, BucketStats, GridInfo};

/// Number of fixed-position legacy series.
pub const LEGACY_SERIES_COUNT: usize = 4;

/// Named series plus the legacy positional series and grid metadata.
///
/// The named mapping is the primary surface. `series0..series3` are kept
/// only because older consumers still read them; they serialize under
/// their historical names alongside `series` and `gridInfo`.
///
/// Series names are kept in a `BTreeMap` so serialization order is stable.
///
/// # Example
///
/// ```rust
/// use tally_core::types::{Bucket, Buckets};
///
/// let mut buckets = Buckets::new();
/// buckets.get_series("ratio").push(Bucket::for_block_index(0, 100_000));
/// assert_eq!(buckets.series("ratio").map(<[Bucket]>::len), Some(1));
/// assert!(buckets.series("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    /// Named series, keyed by metric or `<assetId>.<metric>`.
    #[serde(default)]
    pub series: BTreeMap<String, Vec<Bucket>>,

    /// Legacy positional series 0.
    #[serde(default)]
    pub series0: Vec<Bucket>,
    /// Legacy positional series 1.
    #[serde(default)]
    pub series1: Vec<Bucket>,
    /// Legacy positional series 2.
    #[serde(default)]
    pub series2: Vec<Bucket>,
    /// Legacy positional series 3.
    #[serde(default)]
    pub series3: Vec<Bucket>,

    /// Grid display metadata.
    #[serde(default)]
    pub grid_info: GridInfo,
}

impl Buckets {
    /// Creates an empty container with the default block grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with the given grid metadata.
    #[must_use]
    pub fn with_grid_info(grid_info: GridInfo) -> Self {
        Self {
            grid_info,
            ..Self::default()
        }
    }

    /// Returns the named series, creating an empty one if absent.
    pub fn get_series(&mut self, name: &str) -> &mut Vec<Bucket> {
        self.series.entry(name.to_string()).or_default()
    }

    /// Returns the named series without creating it.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&[Bucket]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Replaces the named series wholesale.
    pub fn set_series(&mut self, name: impl Into<String>, buckets: Vec<Bucket>) {
        self.series.insert(name.into(), buckets);
    }

    /// Creates an empty named series if absent.
    pub fn ensure_series_exists(&mut self, name: &str) {
        if !self.series.contains_key(name) {
            self.series.insert(name.to_string(), Vec::new());
        }
    }

    /// Drops every named series. Legacy series and grid metadata are kept.
    pub fn clear_series(&mut self) {
        self.series.clear();
    }

    /// Returns the series names in lexicographic order.
    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Returns the legacy series at `position`, if it exists.
    #[must_use]
    pub fn legacy_series(&self, position: usize) -> Option<&Vec<Bucket>> {
        match position {
            0 => Some(&self.series0),
            1 => Some(&self.series1),
            2 => Some(&self.series2),
            3 => Some(&self.series3),
            _ => None,
        }
    }

    /// Mutable access to the legacy series at `position`.
    pub fn legacy_series_mut(&mut self, position: usize) -> Option<&mut Vec<Bucket>> {
        match position {
            0 => Some(&mut self.series0),
            1 => Some(&mut self.series1),
            2 => Some(&mut self.series2),
            3 => Some(&mut self.series3),
            _ => None,
        }
    }

    /// Length of the longest series, named or legacy.
    #[must_use]
    pub fn max_series_len(&self) -> usize {
        let named = self.series.values().map(Vec::len).max().unwrap_or(0);
        (0..LEGACY_SERIES_COUNT)
            .filter_map(|i| self.legacy_series(i))
            .map(Vec::len)
            .fold(named, usize::max)
    }

    /// Re-derives `bucket_count` and `rows` from the current series.
    pub fn refresh_bucket_count(&mut self) {
        let count = self.max_series_len();
        self.grid_info.set_bucket_count(count);
    }

    /// Summary statistics of a named series. Missing series yield zeros.
    #[must_use]
    pub fn series_stats(&self, name: &str) -> BucketStats {
        self.series(name)
            .map(BucketStats::from_buckets)
            .unwrap_or_default()
    }

    /// Returns true if no series holds any bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_series_len() == 0
    }
}
