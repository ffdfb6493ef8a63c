//! Tally Configuration Layer
//!
//! Configuration consumed by the chart bucket engine and its facets:
//!
//! - **Series naming**: [`SeriesStrategy`] and [`FacetChartConfig`] control how
//!   per-asset series identifiers are built
//! - **View settings**: [`ViewConfig`] maps facet ids to [`FacetConfig`]
//! - **Loading**: JSON and TOML files, chosen by extension
//!
//! # Example
//!
//! ```rust
//! use tally_config::{FacetChartConfig, FacetConfig, ViewConfig};
//!
//! let view = ViewConfig::new().with_facet(
//!     "assetcharts",
//!     FacetConfig::new("Asset Charts").with_chart_config(FacetChartConfig::new("address", 20)),
//! );
//! assert_eq!(view.chart_config("assetcharts").clamped_prefix_len(), 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod chart;
mod error;
mod view;

pub use chart::{
    FacetChartConfig, SeriesStrategy, DEFAULT_PREFIX_LEN, MAX_PREFIX_LEN, MIN_PREFIX_LEN,
};
pub use error::{ConfigError, ConfigResult};
pub use view::{FacetConfig, ViewConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::chart::{FacetChartConfig, SeriesStrategy};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::view::{FacetConfig, ViewConfig};
}
