//! Facets over exported account history.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tally_config::ViewConfig;
use tally_core::{Buckets, GridInfo};
use tally_engine::assets::rebuild_asset_series;
use tally_engine::Statement;

use crate::error::{FacetError, FacetResult};
use crate::facet::{BucketSource, Facet};

/// Facets of an [`ExportsCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportsFacet {
    /// Reconciled statements.
    Statements,
    /// Balance history.
    Balances,
    /// Token transfers.
    Transfers,
    /// Transactions.
    Transactions,
    /// Approvals still open.
    OpenApprovals,
    /// Approval logs.
    ApprovalLogs,
    /// Approval transactions.
    ApprovalTxs,
    /// Withdrawals.
    Withdrawals,
    /// Assets held.
    Assets,
    /// Per-asset daily chart series.
    AssetCharts,
    /// Event logs.
    Logs,
    /// Traces.
    Traces,
    /// Receipts.
    Receipts,
}

impl ExportsFacet {
    /// Every facet, in display order.
    pub const ALL: [ExportsFacet; 13] = [
        Self::Statements,
        Self::Balances,
        Self::Transfers,
        Self::Transactions,
        Self::OpenApprovals,
        Self::ApprovalLogs,
        Self::ApprovalTxs,
        Self::Withdrawals,
        Self::Assets,
        Self::AssetCharts,
        Self::Logs,
        Self::Traces,
        Self::Receipts,
    ];

    /// Facet name used as the selector and as the view config key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statements => "statements",
            Self::Balances => "balances",
            Self::Transfers => "transfers",
            Self::Transactions => "transactions",
            Self::OpenApprovals => "openapprovals",
            Self::ApprovalLogs => "approvallogs",
            Self::ApprovalTxs => "approvaltxs",
            Self::Withdrawals => "withdrawals",
            Self::Assets => "assets",
            Self::AssetCharts => "assetcharts",
            Self::Logs => "logs",
            Self::Traces => "traces",
            Self::Receipts => "receipts",
        }
    }

    /// Slot of a table facet in [`ExportsCollection`]'s row store.
    ///
    /// `AssetCharts` keeps typed statements and has no table slot.
    fn table_slot(self) -> Option<usize> {
        let position = self as usize;
        match position.cmp(&(Self::AssetCharts as usize)) {
            Ordering::Less => Some(position),
            Ordering::Equal => None,
            Ordering::Greater => Some(position - 1),
        }
    }
}

impl FromStr for ExportsFacet {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|facet| facet.as_str() == s)
            .ok_or_else(|| FacetError::unknown_facet("exports", s))
    }
}

impl fmt::Display for ExportsFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-grid facets over an account's exported history.
///
/// Only `assetcharts` derives buckets, from the statements added to it.
/// Every other facet keeps opaque rows and changes its buckets only
/// through [`BucketSource`].
///
/// # Example
///
/// ```rust
/// use tally_config::ViewConfig;
/// use tally_engine::Statement;
/// use tally_facets::ExportsCollection;
///
/// let exports = ExportsCollection::new(ViewConfig::new());
/// exports.add_statement(Some(Statement {
///     asset: "0x1234567890abcdef1234567890abcdef12345678".into(),
///     symbol: "TEST".into(),
///     decimals: 18,
///     timestamp: 1572639538,
///     ..Default::default()
/// }));
///
/// let buckets = exports.get_buckets("assetcharts");
/// assert!(buckets.series("0x1234567890ab_TEST.frequency").is_some());
/// assert_eq!(buckets.grid_info.size, 86_400);
/// ```
#[derive(Debug)]
pub struct ExportsCollection {
    view: ViewConfig,
    asset_charts: Facet<Statement>,
    tables: Vec<Facet<Value>>,
}

impl ExportsCollection {
    /// Creates empty facets on the default time grid.
    #[must_use]
    pub fn new(view: ViewConfig) -> Self {
        let grid_info = GridInfo::time_grid();
        Self {
            view,
            asset_charts: Facet::new(grid_info),
            tables: ExportsFacet::ALL
                .iter()
                .filter(|facet| facet.table_slot().is_some())
                .map(|_| Facet::new(grid_info))
                .collect(),
        }
    }

    /// The facet behind `selector`.
    #[must_use]
    pub fn facet(&self, selector: ExportsFacet) -> &dyn BucketSource {
        match selector.table_slot() {
            Some(slot) => &self.tables[slot],
            None => &self.asset_charts,
        }
    }

    /// Bucket snapshot of the named facet.
    ///
    /// An unknown name yields empty buckets on the default time grid.
    #[must_use]
    pub fn get_buckets(&self, name: &str) -> Buckets {
        match name.parse::<ExportsFacet>() {
            Ok(selector) => self.facet(selector).get_buckets(),
            Err(err) => {
                tracing::debug!(error = %err, "returning empty buckets");
                Buckets::with_grid_info(GridInfo::time_grid())
            }
        }
    }

    /// Stores a statement and rebuilds every asset series.
    ///
    /// The rebuild covers all stored statements and runs under the facet
    /// lock. `None` is a no-op and leaves prior series untouched.
    pub fn add_statement(&self, statement: Option<Statement>) {
        let Some(statement) = statement else {
            return;
        };
        let config = self.view.chart_config(ExportsFacet::AssetCharts.as_str());
        self.asset_charts.ingest(statement, |items, buckets| {
            rebuild_asset_series(buckets, items, &config);
        });
    }

    /// Stored statements, in arrival order.
    #[must_use]
    pub fn statements(&self) -> Vec<Statement> {
        self.asset_charts.items()
    }

    /// Stores an opaque row in a table facet.
    ///
    /// Statements go through [`ExportsCollection::add_statement`]; rows
    /// aimed at `assetcharts` are rejected.
    pub fn add_row(&self, selector: ExportsFacet, row: Value) -> FacetResult<()> {
        let slot = selector.table_slot().ok_or(FacetError::NotATable {
            name: selector.as_str(),
        })?;
        self.tables[slot].add_item(row);
        Ok(())
    }

    /// Number of rows stored in a facet.
    #[must_use]
    pub fn row_count(&self, selector: ExportsFacet) -> usize {
        match selector.table_slot() {
            Some(slot) => self.tables[slot].len(),
            None => self.asset_charts.len(),
        }
    }
}
