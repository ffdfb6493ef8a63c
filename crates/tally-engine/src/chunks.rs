//! Bucket updates for chunk index and chunk statistics records.

use tally_core::{BlockRange, Buckets};

use crate::dense::update_block_buckets;
use crate::error::EngineResult;
use crate::records::{BlockMetrics, IndexRecord, StatsRecord};
use crate::sparse::update_day_range_buckets;

/// Applies one index chunk to a dense block grid.
pub fn update_index_bucket(buckets: &mut Buckets, record: &IndexRecord) -> EngineResult<()> {
    update_block_buckets(buckets, record)
}

/// Applies one statistics record.
///
/// Records carrying both range dates go to daily buckets for every day the
/// chunk spans; `max_block` is still raised when the block range parses.
/// Records without complete dates use the dense block grid.
pub fn update_stats_bucket(buckets: &mut Buckets, record: &StatsRecord) -> EngineResult<()> {
    let Some(dates) = record.complete_dates() else {
        return update_block_buckets(buckets, record);
    };

    update_day_range_buckets(
        buckets,
        &dates.first_date,
        &dates.last_date,
        &record.metrics(),
    )?;
    match BlockRange::parse(&record.range) {
        Ok(range) => buckets.grid_info.observe_block(range.last),
        Err(err) => tracing::debug!(range = %record.range, error = %err, "stats range not parsed"),
    }
    Ok(())
}
