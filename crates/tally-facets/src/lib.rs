//! # Tally Facets
//!
//! Owners of chart buckets. Each facet keeps its input records and the
//! [`Buckets`](tally_core::Buckets) derived from them behind
//! `parking_lot` locks, and runs every engine update inside one exclusive
//! critical section.
//!
//! - [`Facet`]: generic record store plus buckets
//! - [`BucketSource`]: snapshot, replace, clear, and update access
//! - [`ChunksCollection`]: block-grid facets for the chunked index
//! - [`ExportsCollection`]: time-grid facets for exported account history
//!
//! Bucket updates never fail outward. Malformed records are logged at
//! `warn` and leave prior buckets in place; unknown facet names read as
//! empty buckets.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod chunks;
mod error;
mod exports;
mod facet;

pub use chunks::{ChunksCollection, ChunksFacet};
pub use error::{FacetError, FacetResult};
pub use exports::{ExportsCollection, ExportsFacet};
pub use facet::{BucketSource, Facet};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::chunks::{ChunksCollection, ChunksFacet};
    pub use crate::error::{FacetError, FacetResult};
    pub use crate::exports::{ExportsCollection, ExportsFacet};
    pub use crate::facet::{BucketSource, Facet};
}
