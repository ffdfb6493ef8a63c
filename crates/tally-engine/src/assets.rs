//! Per-asset chart series built from accounting statements.
//!
//! Statements are grouped by asset address, each group gets a series
//! identifier from the configured [`SeriesStrategy`], and six daily metrics
//! are published per asset as `<assetId>.<metric>` sparse series.
//!
//! Every rebuild discards all named series first, so the published set of
//! assets always matches the statements passed in.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tally_config::{FacetChartConfig, SeriesStrategy};
use tally_core::decimal::{base_units_to_f64, effective_decimals, DEFAULT_DECIMALS};
use tally_core::{Bucket, Buckets};

use crate::records::{is_zero_address, Statement};
use crate::sparse::sparse_series;

/// Characters kept by the fallback identifier rule (`0x` plus 12 hex digits).
pub const FALLBACK_ID_LEN: usize = 14;

// =============================================================================
// SERIES IDENTIFIERS
// =============================================================================

/// First `len` characters of `value`, or all of it when shorter.
fn truncate_chars(value: &str, len: usize) -> &str {
    value
        .char_indices()
        .nth(len)
        .map_or(value, |(end, _)| &value[..end])
}

/// Derives the series identifier of one asset.
///
/// # Example
///
/// ```rust
/// use tally_config::FacetChartConfig;
/// use tally_engine::assets::series_identifier;
///
/// let asset = "0x1234567890abcdef1234567890abcdef12345678";
/// let config = FacetChartConfig::new("address+symbol", 10);
/// assert_eq!(series_identifier(asset, "TEST", &config), "0x1234567890_TEST");
/// ```
#[must_use]
pub fn series_identifier(asset: &str, symbol: &str, config: &FacetChartConfig) -> String {
    let prefix = || truncate_chars(asset, 2 + config.clamped_prefix_len());
    match &config.series_strategy {
        SeriesStrategy::Address => prefix().to_string(),
        SeriesStrategy::Symbol => symbol.to_string(),
        SeriesStrategy::AddressSymbol => format!("{}_{symbol}", prefix()),
        SeriesStrategy::Unrecognized(name) => {
            tracing::debug!(strategy = %name, "unrecognized series strategy, using fallback");
            truncate_chars(asset, FALLBACK_ID_LEN).to_string()
        }
    }
}

/// Name of the published series for one asset metric.
#[must_use]
pub fn series_name(asset_id: &str, metric: AssetMetric) -> String {
    format!("{asset_id}.{metric}")
}

/// Partitions statements by exact asset address, keeping input order.
pub fn group_by_asset(statements: &[Statement]) -> BTreeMap<&str, Vec<&Statement>> {
    let mut groups: BTreeMap<&str, Vec<&Statement>> = BTreeMap::new();
    for statement in statements {
        groups.entry(statement.asset.as_str()).or_default().push(statement);
    }
    groups
}

// =============================================================================
// METRICS
// =============================================================================

/// Daily metrics published for every asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetMetric {
    /// Statements per day.
    Frequency,
    /// Sum of amount in plus amount out.
    Volume,
    /// Gas spent, always at 18 decimals.
    GasOut,
    /// Ending balance of the day's last statement in input order.
    EndBal,
    /// Sum of amount in minus amount out.
    NetAmount,
    /// Distinct non-zero counterparties.
    Neighbors,
}

impl AssetMetric {
    /// All metrics, in publication order.
    pub const ALL: [AssetMetric; 6] = [
        Self::Frequency,
        Self::Volume,
        Self::GasOut,
        Self::EndBal,
        Self::NetAmount,
        Self::Neighbors,
    ];

    /// Series suffix of the metric.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Volume => "volume",
            Self::GasOut => "gasOut",
            Self::EndBal => "endBal",
            Self::NetAmount => "netAmount",
            Self::Neighbors => "neighbors",
        }
    }

    /// Computes the metric over one day's statements, in input order.
    #[must_use]
    pub fn aggregate(self, day: &[&Statement]) -> f64 {
        match self {
            Self::Frequency => day.len() as f64,
            Self::Volume => day
                .iter()
                .map(|s| amount(s, &s.amount_in) + amount(s, &s.amount_out))
                .sum(),
            Self::GasOut => day
                .iter()
                .map(|s| base_units_to_f64(&s.gas_out, DEFAULT_DECIMALS))
                .sum(),
            Self::EndBal => day.last().map_or(0.0, |s| amount(s, &s.end_bal)),
            Self::NetAmount => day
                .iter()
                .map(|s| amount(s, &s.amount_in) - amount(s, &s.amount_out))
                .sum(),
            Self::Neighbors => neighbor_count(day) as f64,
        }
    }
}

impl fmt::Display for AssetMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts one amount of `statement` at its own decimals.
fn amount(statement: &Statement, value: &str) -> f64 {
    base_units_to_f64(value, effective_decimals(statement.decimals))
}

fn neighbor_count(day: &[&Statement]) -> usize {
    day.iter()
        .flat_map(|s| [s.sender.as_str(), s.recipient.as_str()])
        .filter(|address| !is_zero_address(address))
        .map(str::to_ascii_lowercase)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Sparse daily series of one metric over one asset's statements.
pub fn metric_buckets(metric: AssetMetric, statements: &[&Statement]) -> Vec<Bucket> {
    sparse_series(
        statements.iter().copied(),
        |s| s.timestamp,
        |day| metric.aggregate(day),
    )
}

// =============================================================================
// REBUILD
// =============================================================================

/// Replaces every named series with per-asset series built from `statements`.
///
/// Legacy series are not touched. `bucket_count` and `rows` are recomputed
/// afterwards. When two assets resolve to the same identifier the asset
/// with the lexicographically later address wins.
pub fn rebuild_asset_series(
    buckets: &mut Buckets,
    statements: &[Statement],
    config: &FacetChartConfig,
) {
    buckets.clear_series();

    let groups = group_by_asset(statements);
    for (asset, group) in &groups {
        let symbol = group.first().map_or("", |s| s.symbol.as_str());
        let asset_id = series_identifier(asset, symbol, config);

        if buckets
            .series(&series_name(&asset_id, AssetMetric::Frequency))
            .is_some()
        {
            tracing::warn!(
                asset_id = %asset_id,
                asset = %asset,
                strategy = %config.series_strategy,
                "series identifier collision, replacing earlier asset"
            );
        }
        for metric in AssetMetric::ALL {
            buckets.set_series(series_name(&asset_id, metric), metric_buckets(metric, group));
        }
    }

    buckets.refresh_bucket_count();
    tracing::debug!(
        assets = groups.len(),
        statements = statements.len(),
        bucket_count = buckets.grid_info.bucket_count,
        "rebuilt asset series"
    );
}
