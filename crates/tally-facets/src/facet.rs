//! The lock-guarded bucket owner.

use parking_lot::RwLock;
use tally_core::{Buckets, GridInfo};

/// Access to a facet's chart buckets.
///
/// Implementations serialize all writers: no two updates to the same
/// `Buckets` interleave.
pub trait BucketSource: Send + Sync {
    /// Snapshot of the current buckets.
    fn get_buckets(&self) -> Buckets;

    /// Replaces the buckets wholesale.
    fn set_buckets(&self, buckets: Buckets);

    /// Resets to empty buckets with the facet's default grid.
    fn clear_buckets(&self);

    /// Runs `update` once with exclusive access to the buckets.
    fn update_buckets<F>(&self, update: F)
    where
        F: FnOnce(&mut Buckets),
        Self: Sized;
}

/// A record store plus the buckets derived from it.
///
/// Lock order is always buckets, then items.
///
/// # Example
///
/// ```rust
/// use tally_core::{Bucket, GridInfo};
/// use tally_facets::{BucketSource, Facet};
///
/// let facet: Facet<u32> = Facet::new(GridInfo::time_grid());
/// facet.ingest(7, |items, buckets| {
///     buckets.get_series("count").push(Bucket::day_with_total("20200101", items.len() as f64));
/// });
///
/// assert_eq!(facet.items(), vec![7]);
/// assert_eq!(facet.get_buckets().series("count").unwrap()[0].total, 1.0);
/// ```
#[derive(Debug)]
pub struct Facet<T> {
    items: RwLock<Vec<T>>,
    buckets: RwLock<Buckets>,
    grid_info: GridInfo,
}

impl<T> Facet<T> {
    /// Creates an empty facet whose buckets start from `grid_info`.
    #[must_use]
    pub fn new(grid_info: GridInfo) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            buckets: RwLock::new(Buckets::with_grid_info(grid_info)),
            grid_info,
        }
    }

    /// Appends a record without touching the buckets.
    pub fn add_item(&self, item: T) {
        self.items.write().push(item);
    }

    /// Appends a record and updates the buckets in one critical section.
    ///
    /// `update` sees every stored record, the new one last.
    pub fn ingest<F>(&self, item: T, update: F)
    where
        F: FnOnce(&[T], &mut Buckets),
    {
        let mut buckets = self.buckets.write();
        let mut items = self.items.write();
        items.push(item);
        update(items.as_slice(), &mut *buckets);
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// True if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl<T: Clone> Facet<T> {
    /// Snapshot of the stored records.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: Send + Sync> BucketSource for Facet<T> {
    fn get_buckets(&self) -> Buckets {
        self.buckets.read().clone()
    }

    fn set_buckets(&self, buckets: Buckets) {
        *self.buckets.write() = buckets;
    }

    fn clear_buckets(&self) {
        *self.buckets.write() = Buckets::with_grid_info(self.grid_info);
    }

    fn update_buckets<F>(&self, update: F)
    where
        F: FnOnce(&mut Buckets),
    {
        update(&mut *self.buckets.write());
    }
}
