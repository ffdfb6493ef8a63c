//! Dense block bucketing.
//!
//! A dense series holds one bucket per `size`-block slice of the chain,
//! starting at block zero, so bucket `i` sits at position `i`. Series only
//! ever grow; accumulated totals are never reset.
//!
//! A record's value is added in full to every bucket its range overlaps.
//! Values are not split by overlap fraction, so totals of ranges that cross
//! a bucket boundary are counted once per bucket touched.

use tally_core::{BlockRange, Bucket, Buckets};

use crate::error::{EngineError, EngineResult};
use crate::records::BlockMetrics;

/// Most buckets a single dense series may hold.
pub const MAX_BUCKETS: u64 = 1_000_000;

/// Appends empty buckets until `series` reaches position `last_bucket_index`.
///
/// Existing buckets are left alone and a longer series is never truncated.
pub fn ensure_buckets_exist(series: &mut Vec<Bucket>, last_bucket_index: usize, size: u64) {
    let wanted = last_bucket_index.saturating_add(1);
    if series.len() >= wanted {
        return;
    }
    series.reserve(wanted - series.len());
    for index in series.len()..wanted {
        series.push(Bucket::for_block_index(index as u64, size));
    }
}

/// Adds `value` to every bucket that `range` overlaps.
///
/// Positions past the end of `series` are skipped; call
/// [`ensure_buckets_exist`] first.
pub fn distribute_to_buckets(series: &mut [Bucket], range: BlockRange, value: f64, size: u64) {
    let (first, last) = range.bucket_indices(size);
    let Ok(first) = usize::try_from(first) else {
        return;
    };
    let last = usize::try_from(last).unwrap_or(usize::MAX);
    if first >= series.len() {
        return;
    }
    let last = last.min(series.len() - 1);
    for bucket in &mut series[first..=last] {
        bucket.add(value);
    }
}

/// Grows and fills one series for one metric.
fn accumulate(series: &mut Vec<Bucket>, range: BlockRange, value: f64, last_index: usize, size: u64) {
    ensure_buckets_exist(series, last_index, size);
    distribute_to_buckets(series, range, value, size);
}

/// Applies one block-ranged record to a dense grid.
///
/// The range is parsed before anything is touched; on failure `buckets` is
/// unchanged and the error is returned. A range whose last bucket would sit
/// at or past [`MAX_BUCKETS`] is rejected the same way. On success every
/// named metric and every legacy value is distributed, then `bucket_count`,
/// `rows`, and `max_block` are recomputed.
///
/// # Example
///
/// ```rust
/// use tally_core::{Buckets, GridInfo};
/// use tally_engine::dense::update_block_buckets;
/// use tally_engine::IndexRecord;
///
/// let mut buckets = Buckets::with_grid_info(GridInfo::block_grid());
/// let record = IndexRecord {
///     range: "000150000-000250000".into(),
///     n_addresses: 10,
///     n_appearances: 40,
///     file_size: 1024,
/// };
/// update_block_buckets(&mut buckets, &record).unwrap();
///
/// let series = buckets.series("nAppearances").unwrap();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series[0].total, 0.0);
/// assert_eq!(series[1].total, 40.0);
/// assert_eq!(series[2].total, 40.0);
/// assert_eq!(buckets.grid_info.max_block, 250_000);
/// ```
pub fn update_block_buckets<R>(buckets: &mut Buckets, record: &R) -> EngineResult<()>
where
    R: BlockMetrics + ?Sized,
{
    let range = BlockRange::parse(record.range())?;
    let size = buckets.grid_info.size.max(1);
    let (_, last_index) = range.bucket_indices(size);
    if last_index >= MAX_BUCKETS {
        return Err(EngineError::GridTooLarge { index: last_index });
    }
    let last_index = last_index as usize;

    for (name, value) in record.metrics() {
        accumulate(buckets.get_series(name), range, value, last_index, size);
    }

    for (position, value) in record.legacy_values().into_iter().enumerate() {
        if let Some(series) = buckets.legacy_series_mut(position) {
            accumulate(series, range, value, last_index, size);
        }
    }

    buckets.refresh_bucket_count();
    buckets.grid_info.observe_block(range.last);

    tracing::trace!(
        range = %range,
        bucket_count = buckets.grid_info.bucket_count,
        "applied block metrics"
    );
    Ok(())
}
