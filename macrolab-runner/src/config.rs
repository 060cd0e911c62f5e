//! Serializable analysis configuration.
//!
//! The pipeline itself always runs [`EdaConfig::example`]. The TOML helpers
//! are here for analysts who copy the template and want to keep their own
//! series list in a file.
//!
//! Charts are written as SVG, not PNG: `figures/time_series.svg`,
//! `figures/correlation.svg` and `figures/distributions.svg`. Vector output
//! has no DPI setting; rasterize downstream if a bitmap is needed.

use chrono::NaiveDate;
use macrolab_core::data::FetchRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or saving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// One series to fetch: the column label and the FRED identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub id: String,
}

impl SeriesSpec {
    pub fn new(label: &str, id: &str) -> Self {
        Self {
            label: label.to_string(),
            id: id.to_string(),
        }
    }
}

/// Where each artifact is written. Chart paths are SVG files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub summary_csv: PathBuf,
    pub time_series_chart: PathBuf,
    pub correlation_chart: PathBuf,
    pub distribution_chart: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            summary_csv: PathBuf::from("data/processed/summary.csv"),
            time_series_chart: PathBuf::from("figures/time_series.svg"),
            correlation_chart: PathBuf::from("figures/correlation.svg"),
            distribution_chart: PathBuf::from("figures/distributions.svg"),
        }
    }
}

impl OutputPaths {
    /// Re-root every relative output path under `root`.
    pub fn under(&self, root: &Path) -> Self {
        Self {
            summary_csv: root.join(&self.summary_csv),
            time_series_chart: root.join(&self.time_series_chart),
            correlation_chart: root.join(&self.correlation_chart),
            distribution_chart: root.join(&self.distribution_chart),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.summary_csv,
            &self.time_series_chart,
            &self.correlation_chart,
            &self.distribution_chart,
        ]
    }
}

/// Full configuration for one exploratory run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaConfig {
    /// Inclusive start date.
    pub start: NaiveDate,

    /// Inclusive end date; today when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,

    /// Columns for the distribution chart; all columns when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_columns: Option<Vec<String>>,

    /// Series in output column order.
    pub series: Vec<SeriesSpec>,

    #[serde(default)]
    pub outputs: OutputPaths,
}

impl EdaConfig {
    /// US macro and market example: CPI, unemployment, fed funds, S&P 500
    /// from 2010 to today.
    pub fn example() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2010, 1, 1).expect("2010-01-01 is a valid date"),
            end: None,
            distribution_columns: Some(vec![
                "cpi".to_string(),
                "unemployment_rate".to_string(),
                "fed_funds_rate".to_string(),
            ]),
            series: vec![
                // US CPI, index 1982-1984 = 100
                SeriesSpec::new("cpi", "CPIAUCSL"),
                SeriesSpec::new("unemployment_rate", "UNRATE"),
                // Effective federal funds rate
                SeriesSpec::new("fed_funds_rate", "FEDFUNDS"),
                SeriesSpec::new("sp500", "SP500"),
            ],
            outputs: OutputPaths::default(),
        }
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Same configuration with every output path re-rooted under `root`.
    pub fn with_output_root(mut self, root: &Path) -> Self {
        self.outputs = self.outputs.under(root);
        self
    }

    /// The fetcher request described by this configuration.
    pub fn fetch_request(&self) -> FetchRequest {
        let request = FetchRequest::new(
            self.series.iter().map(|s| (s.label.as_str(), s.id.as_str())),
            self.start,
        );
        match self.end {
            Some(end) => request.with_end(end),
            None => request,
        }
    }

    /// Distribution chart columns as borrowed labels.
    pub fn distribution_labels(&self) -> Option<Vec<&str>> {
        self.distribution_columns
            .as_ref()
            .map(|cols| cols.iter().map(String::as_str).collect())
    }
}
