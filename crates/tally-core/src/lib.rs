//! # Tally Core
//!
//! Core types for the Tally chart bucket engine.
//!
//! This crate provides the foundational building blocks used throughout Tally:
//!
//! - **Types**: `Bucket`, `BucketStats`, `GridInfo`, and the `Buckets` container
//! - **Decimal conversion**: Base-unit integer strings to whole-unit floats
//! - **Block ranges**: Parsing of `first-last` chunk ranges
//! - **Day keys**: Timezone-independent `YYYYMMDD` keys for daily buckets
//!
//! ## Example
//!
//! ```rust
//! use tally_core::prelude::*;
//!
//! let mut buckets = Buckets::with_grid_info(GridInfo::block_grid());
//! buckets.ensure_series_exists("nAppearances");
//! assert_eq!(buckets.grid_info.size, 100_000);
//!
//! assert_eq!(base_units_to_f64("1000000000000000000", 18), 1.0);
//! assert_eq!(daily_bucket_key(1572639538).unwrap(), "20191101");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]

pub mod daykey;
pub mod decimal;
pub mod error;
pub mod range;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daykey::{daily_bucket_key, day_key, parse_date, parse_date_to_daily_key};
    pub use crate::decimal::{base_units_to_f64, effective_decimals, DEFAULT_DECIMALS};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::range::BlockRange;
    pub use crate::types::{Bucket, BucketStats, Buckets, GridInfo};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use range::BlockRange;
pub use types::{Bucket, BucketStats, Buckets, GridInfo};
