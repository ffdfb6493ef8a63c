//! Summary statistics over a series.

use serde::{Deserialize, Serialize};

use super::Bucket;

/// Summary statistics over a sequence of buckets.
///
/// Always derived from a series, never mutated on its own. An empty series
/// yields all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    /// Sum of bucket totals.
    pub total: f64,
    /// Mean bucket total.
    pub average: f64,
    /// Smallest bucket total.
    pub min: f64,
    /// Largest bucket total.
    pub max: f64,
    /// Number of buckets.
    pub count: usize,
}

impl BucketStats {
    /// Folds a series into its summary.
    #[must_use]
    pub fn from_buckets(buckets: &[Bucket]) -> Self {
        let Some(first) = buckets.first() else {
            return Self::default();
        };

        let (total, min, max) = buckets.iter().fold(
            (0.0, first.total, first.total),
            |(total, min, max), b| (total + b.total, f64::min(min, b.total), f64::max(max, b.total)),
        );

        Self {
            total,
            average: total / buckets.len() as f64,
            min,
            max,
            count: buckets.len(),
        }
    }
}
