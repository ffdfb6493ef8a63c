//! Facets over the chunked appearance index.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tally_core::{Buckets, GridInfo};
use tally_engine::chunks::{update_index_bucket, update_stats_bucket};
use tally_engine::{IndexRecord, StatsRecord};

use crate::error::FacetError;
use crate::facet::{BucketSource, Facet};

/// Facets of a [`ChunksCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunksFacet {
    /// Per-chunk derived statistics.
    Stats,
    /// Per-chunk index summaries.
    Index,
    /// Bloom filter files.
    Blooms,
    /// Manifest entries.
    Manifest,
}

impl ChunksFacet {
    /// Every facet, in display order.
    pub const ALL: [ChunksFacet; 4] = [Self::Stats, Self::Index, Self::Blooms, Self::Manifest];

    /// Facet name used as the selector.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Index => "index",
            Self::Blooms => "blooms",
            Self::Manifest => "manifest",
        }
    }
}

impl FromStr for ChunksFacet {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.as_str() == s)
            .ok_or_else(|| FacetError::unknown_facet("chunks", s))
    }
}

impl fmt::Display for ChunksFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block-grid facets over the index chunks.
///
/// `stats` and `index` derive their buckets from the records added to them.
/// `blooms` and `manifest` keep opaque rows and only change through
/// [`BucketSource`].
///
/// # Example
///
/// ```rust
/// use tally_engine::IndexRecord;
/// use tally_facets::ChunksCollection;
///
/// let chunks = ChunksCollection::new();
/// chunks.add_index(Some(IndexRecord {
///     range: "000000000-000099999".into(),
///     n_addresses: 12,
///     n_appearances: 30,
///     file_size: 2048,
/// }));
///
/// let buckets = chunks.get_buckets("index");
/// assert_eq!(buckets.series("nAddresses").unwrap()[0].total, 12.0);
/// assert!(chunks.get_buckets("nonsense").is_empty());
/// ```
#[derive(Debug)]
pub struct ChunksCollection {
    stats: Facet<StatsRecord>,
    index: Facet<IndexRecord>,
    blooms: Facet<Value>,
    manifest: Facet<Value>,
}

impl Default for ChunksCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunksCollection {
    /// Creates empty facets on the default block grid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grid_info(GridInfo::block_grid())
    }

    /// Creates empty facets on the given grid.
    #[must_use]
    pub fn with_grid_info(grid_info: GridInfo) -> Self {
        Self {
            stats: Facet::new(grid_info),
            index: Facet::new(grid_info),
            blooms: Facet::new(grid_info),
            manifest: Facet::new(grid_info),
        }
    }

    /// The facet behind `selector`.
    #[must_use]
    pub fn facet(&self, selector: ChunksFacet) -> &dyn BucketSource {
        match selector {
            ChunksFacet::Stats => &self.stats,
            ChunksFacet::Index => &self.index,
            ChunksFacet::Blooms => &self.blooms,
            ChunksFacet::Manifest => &self.manifest,
        }
    }

    /// Bucket snapshot of the named facet.
    ///
    /// An unknown name yields empty buckets on the default block grid.
    #[must_use]
    pub fn get_buckets(&self, name: &str) -> Buckets {
        match name.parse::<ChunksFacet>() {
            Ok(selector) => self.facet(selector).get_buckets(),
            Err(err) => {
                tracing::debug!(error = %err, "returning empty buckets");
                Buckets::with_grid_info(GridInfo::block_grid())
            }
        }
    }

    /// Stores an index record and applies it to the `index` buckets.
    ///
    /// `None` is a no-op. A record whose range does not parse is stored but
    /// leaves the buckets unchanged.
    pub fn add_index(&self, record: Option<IndexRecord>) {
        let Some(record) = record else {
            return;
        };
        self.index.ingest(record, |items, buckets| {
            let Some(latest) = items.last() else {
                return;
            };
            if let Err(err) = update_index_bucket(buckets, latest) {
                tracing::warn!(range = %latest.range, error = %err, "index bucket update skipped");
            }
        });
    }

    /// Stores a statistics record and applies it to the `stats` buckets.
    ///
    /// `None` is a no-op. Malformed ranges or dates leave the buckets
    /// unchanged.
    pub fn add_stats(&self, record: Option<StatsRecord>) {
        let Some(record) = record else {
            return;
        };
        self.stats.ingest(record, |items, buckets| {
            let Some(latest) = items.last() else {
                return;
            };
            if let Err(err) = update_stats_bucket(buckets, latest) {
                tracing::warn!(range = %latest.range, error = %err, "stats bucket update skipped");
            }
        });
    }

    /// Stored index records.
    #[must_use]
    pub fn index_records(&self) -> Vec<IndexRecord> {
        self.index.items()
    }

    /// Stored statistics records.
    #[must_use]
    pub fn stats_records(&self) -> Vec<StatsRecord> {
        self.stats.items()
    }

    /// Stores an opaque bloom row.
    pub fn add_bloom(&self, row: Value) {
        self.blooms.add_item(row);
    }

    /// Stores an opaque manifest row.
    pub fn add_manifest(&self, row: Value) {
        self.manifest.add_item(row);
    }
}
