//! Input records consumed by the bucket updates.
//!
//! These mirror the shapes produced by the data sources; the engine only
//! reads them.

use serde::{Deserialize, Serialize};

/// A block-ranged record that contributes named metrics to a dense grid.
pub trait BlockMetrics {
    /// The record's `first-last` block range, unparsed.
    fn range(&self) -> &str;

    /// Named metric values distributed into named series.
    fn metrics(&self) -> Vec<(&'static str, f64)>;

    /// Values for the legacy positional series, in position order.
    /// Positions beyond the fourth are ignored.
    fn legacy_values(&self) -> Vec<f64> {
        self.metrics().into_iter().map(|(_, v)| v).collect()
    }
}

// =============================================================================
// CHUNK INDEX
// =============================================================================

/// Summary of one index chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRecord {
    /// Block range covered by the chunk, `first-last`.
    pub range: String,
    /// Distinct addresses in the chunk.
    #[serde(default)]
    pub n_addresses: u64,
    /// Appearances recorded in the chunk.
    #[serde(default)]
    pub n_appearances: u64,
    /// Chunk file size in bytes.
    #[serde(default)]
    pub file_size: u64,
}

impl BlockMetrics for IndexRecord {
    fn range(&self) -> &str {
        &self.range
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("nAddresses", self.n_addresses as f64),
            ("nAppearances", self.n_appearances as f64),
            ("fileSize", self.file_size as f64),
        ]
    }
}

// =============================================================================
// CHUNK STATISTICS
// =============================================================================

/// Calendar dates spanned by a chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDates {
    /// Date of the first block.
    #[serde(default)]
    pub first_date: String,
    /// Date of the last block.
    #[serde(default)]
    pub last_date: String,
}

impl RangeDates {
    /// Both dates are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.first_date.is_empty() && !self.last_date.is_empty()
    }
}

/// Derived statistics of one index chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    /// Block range covered by the chunk, `first-last`.
    pub range: String,
    /// Ratio of appearances to addresses.
    #[serde(default)]
    pub ratio: f64,
    /// Appearances per block.
    #[serde(default)]
    pub apps_per_block: f64,
    /// Addresses per block.
    #[serde(default)]
    pub addrs_per_block: f64,
    /// Appearances per address.
    #[serde(default)]
    pub apps_per_addr: f64,
    /// Calendar dates of the range, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_dates: Option<RangeDates>,
}

impl StatsRecord {
    /// The range dates, if both ends are present.
    #[must_use]
    pub fn complete_dates(&self) -> Option<&RangeDates> {
        self.range_dates.as_ref().filter(|d| d.is_complete())
    }
}

impl BlockMetrics for StatsRecord {
    fn range(&self) -> &str {
        &self.range
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("ratio", self.ratio),
            ("appsPerBlock", self.apps_per_block),
            ("addrsPerBlock", self.addrs_per_block),
            ("appsPerAddr", self.apps_per_addr),
        ]
    }
}

// =============================================================================
// STATEMENTS
// =============================================================================

/// One reconciled accounting statement for an asset.
///
/// Amounts are base-unit integers rendered as base-10 strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    /// Asset contract address, canonical hex.
    pub asset: String,
    /// Token symbol.
    #[serde(default)]
    pub symbol: String,
    /// Decimal places of the asset; zero or negative means unknown.
    #[serde(default)]
    pub decimals: i64,
    /// Block timestamp, Unix seconds.
    pub timestamp: i64,
    /// Amount received.
    #[serde(default)]
    pub amount_in: String,
    /// Amount sent.
    #[serde(default)]
    pub amount_out: String,
    /// Gas spent, in wei.
    #[serde(default)]
    pub gas_out: String,
    /// Balance after the statement.
    #[serde(default)]
    pub end_bal: String,
    /// Counterparty sending the asset.
    #[serde(default)]
    pub sender: String,
    /// Counterparty receiving the asset.
    #[serde(default)]
    pub recipient: String,
}

/// True for an empty string or an all-zero hex address.
#[must_use]
pub fn is_zero_address(address: &str) -> bool {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    hex.bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_metrics() {
        let record = IndexRecord {
            range: "0-99".into(),
            n_addresses: 10,
            n_appearances: 25,
            file_size: 4096,
        };
        assert_eq!(
            record.metrics(),
            vec![
                ("nAddresses", 10.0),
                ("nAppearances", 25.0),
                ("fileSize", 4096.0)
            ]
        );
        assert_eq!(record.legacy_values(), vec![10.0, 25.0, 4096.0]);
    }

    #[test]
    fn test_stats_dates() {
        let mut stats = StatsRecord {
            range: "0-99".into(),
            ..Default::default()
        };
        assert!(stats.complete_dates().is_none());

        stats.range_dates = Some(RangeDates {
            first_date: "2015-07-30".into(),
            last_date: String::new(),
        });
        assert!(stats.complete_dates().is_none());

        stats.range_dates = Some(RangeDates {
            first_date: "2015-07-30".into(),
            last_date: "2015-07-31".into(),
        });
        assert!(stats.complete_dates().is_some());
        assert_eq!(stats.legacy_values().len(), 4);
    }

    #[test]
    fn test_statement_from_json() {
        let stmt: Statement = serde_json::from_str(
            r#"{"asset":"0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee","symbol":"ETH",
                "decimals":18,"timestamp":1572639538,"amountIn":"1000000000000000000",
                "gasOut":"21000000000000","sender":"0x0000000000000000000000000000000000000000"}"#,
        )
        .unwrap();
        assert_eq!(stmt.symbol, "ETH");
        assert_eq!(stmt.amount_out, "");
        assert!(is_zero_address(&stmt.sender));
        assert!(is_zero_address(&stmt.recipient));
    }

    #[test]
    fn test_zero_address() {
        assert!(is_zero_address(""));
        assert!(is_zero_address("0x"));
        assert!(is_zero_address("0x0000"));
        assert!(!is_zero_address("0x0001"));
        assert!(!is_zero_address("0xabc"));
    }
}
