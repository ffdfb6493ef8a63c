//! Error types for facet selection.

use thiserror::Error;

/// Result type for facet operations.
pub type FacetResult<T> = Result<T, FacetError>;

/// Facet lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacetError {
    /// No facet with this name exists in the collection.
    #[error("Unknown facet '{name}' in {collection}")]
    UnknownFacet {
        /// Collection that was searched.
        collection: &'static str,
        /// Name as given.
        name: String,
    },

    /// The facet's records are typed and must be added through their own method.
    #[error("Facet '{name}' does not accept raw rows")]
    NotATable {
        /// Facet name.
        name: &'static str,
    },
}

impl FacetError {
    /// Creates an unknown facet error.
    #[must_use]
    pub fn unknown_facet(collection: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownFacet {
            collection,
            name: name.into(),
        }
    }
}
