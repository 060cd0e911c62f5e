//! End-to-end exploratory run: fetch, summarize, chart, write.
//!
//! `run_eda()` takes the provider as a parameter so tests can drive it with
//! a [`StaticProvider`](macrolab_core::data::StaticProvider).
//! `run_quick_eda()` is the fixed example run used by the CLI.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use macrolab_core::data::{fetch_series, DataError, FredProvider, SeriesProvider};
use macrolab_core::domain::TimeFrame;

use crate::charts::{
    plot_correlation_heatmap, plot_distribution, plot_time_series, select_columns, Chart,
    ChartError,
};
use crate::config::EdaConfig;
use crate::summary::{summarize, SummaryError, SummaryTable};

/// Errors from a pipeline run. Any failure aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
    #[error("create output directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct EdaReport {
    /// The merged table the charts were drawn from.
    pub frame: TimeFrame,
    pub summary: SummaryTable,
    /// Files written, in the order they were written.
    pub artifacts: Vec<PathBuf>,
}

fn ensure_parent(path: &Path) -> Result<(), PipelineError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn save_chart(chart: &impl Chart, path: &Path) -> Result<(), PipelineError> {
    ensure_parent(path)?;
    chart.save(path)?;
    info!(path = %path.display(), "saved chart");
    Ok(())
}

/// Run the full analysis for `config`, reading series from `provider`.
///
/// Writes the summary CSV, then the time-series, correlation and
/// distribution charts, creating parent directories as needed. Fetch and
/// selection errors are raised before the first file is written.
pub fn run_eda(
    config: &EdaConfig,
    provider: &dyn SeriesProvider,
) -> Result<EdaReport, PipelineError> {
    let request = config.fetch_request();
    let frame = fetch_series(provider, &request)?;

    // Reject a bad distribution selection before anything is written.
    let selection = config.distribution_labels();
    select_columns(&frame, selection.as_deref())?;

    let outputs = &config.outputs;
    let mut artifacts = Vec::with_capacity(4);

    let summary = summarize(&frame);
    ensure_parent(&outputs.summary_csv)?;
    summary.write_csv(&outputs.summary_csv)?;
    info!(path = %outputs.summary_csv.display(), "saved summary");
    artifacts.push(outputs.summary_csv.clone());

    let time_series = plot_time_series(&frame, None);
    save_chart(&time_series, &outputs.time_series_chart)?;
    artifacts.push(outputs.time_series_chart.clone());

    let heatmap = plot_correlation_heatmap(&frame, None)?;
    save_chart(&heatmap, &outputs.correlation_chart)?;
    artifacts.push(outputs.correlation_chart.clone());

    let distribution = plot_distribution(&frame, selection.as_deref())?;
    save_chart(&distribution, &outputs.distribution_chart)?;
    artifacts.push(outputs.distribution_chart.clone());

    Ok(EdaReport {
        frame,
        summary,
        artifacts,
    })
}

/// Run the example analysis against FRED, writing under the working
/// directory.
pub fn run_quick_eda() -> Result<EdaReport, PipelineError> {
    let provider = FredProvider::new()?;
    let config = EdaConfig::example();
    let report = run_eda(&config, &provider)?;

    let mut dirs: Vec<String> = report
        .artifacts
        .iter()
        .filter_map(|p| p.parent())
        .map(|d| d.display().to_string())
        .collect();
    dirs.dedup();
    info!(outputs = %dirs.join(", "), "EDA complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_parent_accepts_bare_file_names() {
        assert!(ensure_parent(Path::new("summary.csv")).is_ok());
    }

    #[test]
    fn ensure_parent_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/out.svg");
        ensure_parent(&path).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
    }
}
