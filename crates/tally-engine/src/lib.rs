//! # Tally Engine
//!
//! Bucketing algorithms that turn ranged and timestamped records into chart
//! series.
//!
//! ## Paths
//!
//! - [`dense`]: fixed-size block buckets from block zero, one series per
//!   metric plus the legacy positional series
//! - [`sparse`]: `YYYYMMDD` day buckets created only for days with data
//! - [`chunks`]: index and statistics records, choosing dense or daily
//! - [`assets`]: per-asset daily series from accounting statements
//!
//! All updates mutate a caller-owned [`Buckets`](tally_core::Buckets) and are
//! meant to run under the caller's exclusive lock. Fallible updates validate
//! their input before touching any bucket.
//!
//! ## Example
//!
//! ```rust
//! use tally_config::FacetChartConfig;
//! use tally_core::{Buckets, GridInfo};
//! use tally_engine::prelude::*;
//!
//! let statements = vec![Statement {
//!     asset: "0x1234567890abcdef1234567890abcdef12345678".into(),
//!     symbol: "TEST".into(),
//!     decimals: 18,
//!     timestamp: 1572639538,
//!     amount_in: "1000000000000000000".into(),
//!     ..Default::default()
//! }];
//!
//! let mut buckets = Buckets::with_grid_info(GridInfo::time_grid());
//! rebuild_asset_series(&mut buckets, &statements, &FacetChartConfig::default());
//!
//! let volume = buckets.series("0x1234567890ab_TEST.volume").unwrap();
//! assert_eq!(volume[0].bucket_key, "20191101");
//! assert_eq!(volume[0].total, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod assets;
pub mod chunks;
pub mod dense;
pub mod error;
pub mod records;
pub mod sparse;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assets::{rebuild_asset_series, series_identifier, AssetMetric};
    pub use crate::chunks::{update_index_bucket, update_stats_bucket};
    pub use crate::dense::update_block_buckets;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::records::{BlockMetrics, IndexRecord, RangeDates, StatsRecord, Statement};
    pub use crate::sparse::{sparse_series, update_day_range_buckets};
}

pub use error::{EngineError, EngineResult};
pub use records::{BlockMetrics, IndexRecord, RangeDates, StatsRecord, Statement};
