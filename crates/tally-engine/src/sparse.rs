//! Sparse daily bucketing.
//!
//! Day buckets are keyed `YYYYMMDD` (UTC) and exist only for days that
//! have at least one contributing record. Series built here are always
//! sorted by day key, which for this key format is chronological order.

use std::collections::BTreeMap;

use tally_core::daykey::{daily_bucket_key, day_key, days_inclusive, parse_date};
use tally_core::{Bucket, Buckets};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// TIMESTAMPED RECORDS
// =============================================================================

/// Groups records by the UTC day of their timestamp.
///
/// Input order is preserved inside each day. Records whose timestamp cannot
/// be represented as a calendar date are skipped.
pub fn group_by_day<'a, T, I, F>(records: I, timestamp: F) -> BTreeMap<String, Vec<&'a T>>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> i64,
    T: 'a,
{
    let mut days: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for record in records {
        let ts = timestamp(record);
        match daily_bucket_key(ts) {
            Ok(key) => days.entry(key).or_default().push(record),
            Err(err) => tracing::debug!(timestamp = ts, error = %err, "skipping record"),
        }
    }
    days
}

/// Builds one sparse day series from timestamped records.
///
/// `aggregate` receives every record of a day, in input order, and returns
/// that day's total.
///
/// # Example
///
/// ```rust
/// use tally_engine::sparse::sparse_series;
///
/// let stamps = [1572639538_i64, 1572640000, 1576868456];
/// let series = sparse_series(&stamps, |ts| *ts, |day| day.len() as f64);
///
/// let keys: Vec<_> = series.iter().map(|b| b.bucket_key.as_str()).collect();
/// assert_eq!(keys, vec!["20191101", "20191220"]);
/// assert_eq!(series[0].total, 2.0);
/// ```
pub fn sparse_series<'a, T, I, F, A>(records: I, timestamp: F, aggregate: A) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> i64,
    A: Fn(&[&'a T]) -> f64,
    T: 'a,
{
    group_by_day(records, timestamp)
        .into_iter()
        .map(|(key, day)| Bucket::day_with_total(key, aggregate(day.as_slice())))
        .collect()
}

// =============================================================================
// DATE RANGES
// =============================================================================

/// Returns the day bucket for `key`, inserting it in key order if absent.
fn day_bucket<'s>(series: &'s mut Vec<Bucket>, key: String) -> &'s mut Bucket {
    let position = match series.binary_search_by(|b| b.bucket_key.as_str().cmp(key.as_str())) {
        Ok(found) => found,
        Err(insert_at) => {
            series.insert(insert_at, Bucket::for_day(key));
            insert_at
        }
    };
    &mut series[position]
}

/// Adds each metric to every day from `first_date` through `last_date`.
///
/// Both dates are parsed before anything is touched; a parse failure or a
/// reversed range returns an error and leaves `buckets` unchanged. Only
/// the spanned days get buckets. Legacy series are not used.
pub fn update_day_range_buckets(
    buckets: &mut Buckets,
    first_date: &str,
    last_date: &str,
    metrics: &[(&str, f64)],
) -> EngineResult<()> {
    let first = parse_date(first_date)?;
    let last = parse_date(last_date)?;
    if first > last {
        return Err(EngineError::reversed_dates(first_date, last_date));
    }

    let keys: Vec<String> = days_inclusive(first, last).map(day_key).collect();
    for (name, value) in metrics {
        let series = buckets.get_series(name);
        for key in &keys {
            day_bucket(series, key.clone()).add(*value);
        }
    }

    buckets.refresh_bucket_count();
    tracing::trace!(
        first = %first,
        last = %last,
        days = keys.len(),
        "applied date range metrics"
    );
    Ok(())
}
