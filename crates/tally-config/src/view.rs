//! Per-view facet configuration and loading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::chart::FacetChartConfig;
use crate::error::{ConfigError, ConfigResult};

/// Settings for a single facet of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetConfig {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Chart settings; only facets that publish asset series carry them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_chart_config: Option<FacetChartConfig>,
}

impl FacetConfig {
    /// Creates a facet config with a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facet_chart_config: None,
        }
    }

    /// Attaches chart settings.
    #[must_use]
    pub fn with_chart_config(mut self, config: FacetChartConfig) -> Self {
        self.facet_chart_config = Some(config);
        self
    }
}

/// Configuration of one view (a collection of facets).
///
/// # Example
///
/// ```rust
/// use tally_config::{SeriesStrategy, ViewConfig};
///
/// let view = ViewConfig::from_json_str(
///     r#"{"facets":{"assetcharts":{"facetChartConfig":{"seriesStrategy":"symbol"}}}}"#,
/// )
/// .unwrap();
/// assert_eq!(view.chart_config("assetcharts").series_strategy, SeriesStrategy::Symbol);
/// // Facets without chart settings fall back to the default.
/// assert_eq!(view.chart_config("statements").series_strategy, SeriesStrategy::AddressSymbol);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Facet settings keyed by facet id.
    #[serde(default)]
    pub facets: BTreeMap<String, FacetConfig>,
}

impl ViewConfig {
    /// Creates an empty view configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a facet's settings.
    #[must_use]
    pub fn with_facet(mut self, id: impl Into<String>, facet: FacetConfig) -> Self {
        self.facets.insert(id.into(), facet);
        self
    }

    /// Chart settings for `facet_id`, or the defaults when none are configured.
    #[must_use]
    pub fn chart_config(&self, facet_id: &str) -> FacetChartConfig {
        match self
            .facets
            .get(facet_id)
            .and_then(|f| f.facet_chart_config.clone())
        {
            Some(config) => config,
            None => {
                tracing::trace!(facet = facet_id, "no chart config, using defaults");
                FacetChartConfig::default()
            }
        }
    }

    /// Parses a view configuration from JSON.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parses a view configuration from TOML.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Loads a view configuration file; the extension (`.json` or `.toml`)
    /// selects the format.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> ConfigResult<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&contents)?;
        tracing::debug!(path = %path.display(), facets = config.facets.len(), "loaded view config");
        Ok(config)
    }
}
