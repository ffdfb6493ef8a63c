//! Chart series naming configuration.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Smallest address prefix length, in hex characters after `0x`.
pub const MIN_PREFIX_LEN: usize = 8;

/// Largest address prefix length, in hex characters after `0x`.
pub const MAX_PREFIX_LEN: usize = 15;

/// Prefix length used when no configuration is supplied.
pub const DEFAULT_PREFIX_LEN: usize = 12;

// =============================================================================
// SERIES STRATEGY
// =============================================================================

/// How asset series identifiers are derived.
///
/// Parsing never fails: an unknown name is kept as [`SeriesStrategy::Unrecognized`]
/// and resolved to the fallback truncation rule when identifiers are built.
///
/// # Example
///
/// ```rust
/// use tally_config::SeriesStrategy;
///
/// let s: SeriesStrategy = "address+symbol".parse().unwrap();
/// assert_eq!(s, SeriesStrategy::AddressSymbol);
///
/// let odd: SeriesStrategy = "by-color".parse().unwrap();
/// assert_eq!(odd, SeriesStrategy::Unrecognized("by-color".into()));
/// assert_eq!(odd.to_string(), "by-color");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeriesStrategy {
    /// Truncated asset address.
    Address,
    /// Token symbol, verbatim.
    Symbol,
    /// Truncated address and symbol joined with `_`.
    #[default]
    AddressSymbol,
    /// Any other value, kept as given.
    Unrecognized(String),
}

impl SeriesStrategy {
    /// Wire name of the strategy.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Address => "address",
            Self::Symbol => "symbol",
            Self::AddressSymbol => "address+symbol",
            Self::Unrecognized(other) => other,
        }
    }
}

impl From<&str> for SeriesStrategy {
    fn from(value: &str) -> Self {
        match value {
            "address" => Self::Address,
            "symbol" => Self::Symbol,
            "address+symbol" => Self::AddressSymbol,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SeriesStrategy {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SeriesStrategy> for String {
    fn from(value: SeriesStrategy) -> Self {
        match value {
            SeriesStrategy::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for SeriesStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for SeriesStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// FACET CHART CONFIG
// =============================================================================

/// Chart settings for a facet that publishes per-asset series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetChartConfig {
    /// Naming strategy for asset series.
    #[serde(default)]
    pub series_strategy: SeriesStrategy,

    /// Suggested address prefix length, clamped to `[8, 15]` on use.
    #[serde(default = "default_prefix_len")]
    pub series_prefix_len: usize,
}

fn default_prefix_len() -> usize {
    DEFAULT_PREFIX_LEN
}

impl Default for FacetChartConfig {
    fn default() -> Self {
        Self {
            series_strategy: SeriesStrategy::AddressSymbol,
            series_prefix_len: DEFAULT_PREFIX_LEN,
        }
    }
}

impl FacetChartConfig {
    /// Creates a config with the given strategy and prefix length.
    pub fn new(series_strategy: impl Into<SeriesStrategy>, series_prefix_len: usize) -> Self {
        Self {
            series_strategy: series_strategy.into(),
            series_prefix_len,
        }
    }

    /// Sets the naming strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<SeriesStrategy>) -> Self {
        self.series_strategy = strategy.into();
        self
    }

    /// Sets the suggested prefix length.
    #[must_use]
    pub fn with_prefix_len(mut self, len: usize) -> Self {
        self.series_prefix_len = len;
        self
    }

    /// Prefix length clamped to `[MIN_PREFIX_LEN, MAX_PREFIX_LEN]`.
    #[must_use]
    pub fn clamped_prefix_len(&self) -> usize {
        self.series_prefix_len.clamp(MIN_PREFIX_LEN, MAX_PREFIX_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = FacetChartConfig::default();
        assert_eq!(config.series_strategy, SeriesStrategy::AddressSymbol);
        assert_eq!(config.series_prefix_len, 12);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(FacetChartConfig::new("address", 5).clamped_prefix_len(), 8);
        assert_eq!(FacetChartConfig::new("address", 20).clamped_prefix_len(), 15);
        assert_eq!(FacetChartConfig::new("address", 10).clamped_prefix_len(), 10);
    }

    #[test]
    fn test_strategy_round_trip_names() {
        for name in ["address", "symbol", "address+symbol", "whatever"] {
            let strategy = SeriesStrategy::from(name);
            assert_eq!(String::from(strategy.clone()), name);
            assert_eq!(strategy.to_string(), name);
        }
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: FacetChartConfig =
            serde_json::from_str(r#"{"seriesStrategy":"symbol","seriesPrefixLen":9}"#).unwrap();
        assert_eq!(config.series_strategy, SeriesStrategy::Symbol);
        assert_eq!(config.series_prefix_len, 9);
    }

    #[test]
    fn test_deserialize_unknown_strategy_is_not_an_error() {
        let config: FacetChartConfig =
            serde_json::from_str(r#"{"seriesStrategy":"ticker"}"#).unwrap();
        assert_eq!(
            config.series_strategy,
            SeriesStrategy::Unrecognized("ticker".into())
        );
        assert_eq!(config.series_prefix_len, DEFAULT_PREFIX_LEN);
    }

    #[test]
    fn test_serialize_strategy_as_string() {
        let json = serde_json::to_value(FacetChartConfig::default()).unwrap();
        assert_eq!(json["seriesStrategy"], "address+symbol");
        assert_eq!(json["seriesPrefixLen"], 12);
    }
}
