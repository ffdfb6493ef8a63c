//! Daily bucket keys.
//!
//! Day keys are the `YYYYMMDD` rendering of a UTC calendar date, so they
//! sort lexicographically in chronological order and never depend on the
//! local timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{CoreError, CoreResult};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Formats a calendar date as its `YYYYMMDD` key.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// UTC calendar date of a Unix timestamp in seconds.
pub fn utc_date(timestamp: i64) -> CoreResult<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or(CoreError::TimestampOutOfRange { timestamp })
}

/// Daily bucket key of a Unix timestamp in seconds.
///
/// # Example
///
/// ```rust
/// use tally_core::daykey::daily_bucket_key;
///
/// assert_eq!(daily_bucket_key(1572639538).unwrap(), "20191101");
/// assert_eq!(daily_bucket_key(1576868456).unwrap(), "20191220");
/// ```
pub fn daily_bucket_key(timestamp: i64) -> CoreResult<String> {
    utc_date(timestamp).map(day_key)
}

/// Parses a date string into its calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (space or `T` separated),
/// either optionally followed by ` UTC`, and RFC 3339 timestamps, which are
/// converted to UTC first.
pub fn parse_date(input: &str) -> CoreResult<NaiveDate> {
    let trimmed = input.trim();
    let bare = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);

    if let Ok(date) = NaiveDate::parse_from_str(bare, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(bare, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(bare) {
        return Ok(dt.naive_utc().date());
    }

    Err(CoreError::invalid_date(
        input,
        "expected YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, or RFC 3339",
    ))
}

/// Parses a date string straight to its daily bucket key.
pub fn parse_date_to_daily_key(input: &str) -> CoreResult<String> {
    parse_date(input).map(day_key)
}

/// Every calendar date from `first` to `last`, inclusive.
///
/// Empty when `first > last`.
pub fn days_inclusive(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_timestamps() {
        assert_eq!(daily_bucket_key(1572639538).unwrap(), "20191101");
        assert_eq!(daily_bucket_key(1572660966).unwrap(), "20191102");
        assert_eq!(daily_bucket_key(1576868456).unwrap(), "20191220");
    }

    #[test]
    fn test_day_boundaries() {
        assert_eq!(daily_bucket_key(0).unwrap(), "19700101");
        assert_eq!(daily_bucket_key(86_399).unwrap(), "19700101");
        assert_eq!(daily_bucket_key(86_400).unwrap(), "19700102");
        assert_eq!(daily_bucket_key(-1).unwrap(), "19691231");
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            daily_bucket_key(i64::MAX),
            Err(CoreError::TimestampOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2015, 7, 30).unwrap();
        for input in [
            "2015-07-30",
            "2015-07-30 15:26:28",
            "2015-07-30 15:26:28 UTC",
            "2015-07-30T15:26:28",
            "2015-07-30T15:26:28Z",
            " 2015-07-30 ",
        ] {
            assert_eq!(parse_date(input).unwrap(), expected, "{input:?}");
        }
        assert_eq!(parse_date_to_daily_key("2015-07-30").unwrap(), "20150730");
    }

    #[test]
    fn test_rfc3339_converts_to_utc() {
        // 23:30 at -02:00 is already the next day in UTC.
        assert_eq!(
            parse_date_to_daily_key("2020-01-01T23:30:00-02:00").unwrap(),
            "20200102"
        );
    }

    #[test]
    fn test_parse_date_rejects() {
        for bad in ["", "yesterday", "2015-13-01", "2015/07/30", "20150730"] {
            assert!(parse_date(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_days_inclusive() {
        let first = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
        let last = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let keys: Vec<_> = days_inclusive(first, last).map(day_key).collect();
        assert_eq!(keys, vec!["20200227", "20200228", "20200229", "20200301"]);
        assert_eq!(days_inclusive(last, first).count(), 0);
    }
}
