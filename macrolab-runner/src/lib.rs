//! MacroLab Runner: summary statistics, charts and the EDA pipeline.
//!
//! This crate builds on `macrolab-core` to provide:
//! - Per-series descriptive statistics written as CSV
//! - Time-series, correlation heatmap and distribution charts (SVG)
//! - TOML run configuration with the bundled US macro example
//! - The fetch → summarize → chart pipeline

pub mod charts;
pub mod config;
pub mod pipeline;
pub mod summary;

pub use charts::{
    plot_correlation_heatmap, plot_distribution, plot_time_series, Chart, ChartError,
    CorrelationHeatmap, DistributionChart, Theme, TimeSeriesChart,
};
pub use config::{ConfigError, EdaConfig, OutputPaths, SeriesSpec};
pub use pipeline::{run_eda, run_quick_eda, EdaReport, PipelineError};
pub use summary::{summarize, SeriesSummary, SummaryError, SummaryTable};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<EdaConfig>();
        assert_sync::<EdaConfig>();
    }

    #[test]
    fn report_is_send_sync() {
        assert_send::<EdaReport>();
        assert_sync::<EdaReport>();
    }

    #[test]
    fn figures_are_send_sync() {
        assert_send::<TimeSeriesChart>();
        assert_send::<CorrelationHeatmap>();
        assert_send::<DistributionChart>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<PipelineError>();
        assert_sync::<PipelineError>();
    }
}
