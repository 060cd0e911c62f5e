//! MacroLab CLI: run the example US macro exploratory analysis.
//!
//! Fetches CPI, unemployment, the fed funds rate and the S&P 500 from FRED,
//! writes `data/processed/summary.csv` and three SVG charts under
//! `figures/`, relative to the working directory. Takes no arguments;
//! log verbosity follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use macrolab_runner::{run_quick_eda, EdaReport, SummaryTable};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_report(report: &EdaReport) {
    println!();
    println!("=== Summary ===");
    for row in &report.summary.rows {
        let fmt = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "-".into());
        let range = match (row.start_date, row.end_date) {
            (Some(s), Some(e)) => format!("{s} .. {e}"),
            _ => "no data".to_string(),
        };
        println!(
            "  {:<20} n={:<6} mean={:<10} std={:<10} missing={:>6}%  {}",
            row.label,
            row.count,
            fmt(row.mean),
            fmt(row.std),
            fmt(row.missing_pct),
            range,
        );
    }

    println!();
    println!("=== Artifacts ===");
    for path in &report.artifacts {
        println!("  {}", path.display());
    }
}

/// Labels of series that returned no values over the requested range.
fn empty_series(summary: &SummaryTable) -> Vec<&str> {
    summary
        .rows
        .iter()
        .filter(|row| row.count == 0)
        .map(|row| row.label.as_str())
        .collect()
}

fn main() -> Result<()> {
    setup_logging();
    let report = run_quick_eda().context("exploratory analysis failed")?;

    for label in empty_series(&report.summary) {
        warn!(series = label, "no observations in range");
    }
    info!(
        series = report.summary.len(),
        artifacts = report.artifacts.len(),
        "report ready"
    );

    print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolab_runner::SeriesSummary;

    fn row(label: &str, count: usize) -> SeriesSummary {
        SeriesSummary {
            label: label.to_string(),
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
            missing_pct: None,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn empty_series_lists_only_series_without_values() {
        let summary = SummaryTable {
            rows: vec![row("cpi", 12), row("sp500", 0), row("unemployment_rate", 3)],
        };
        assert_eq!(empty_series(&summary), vec!["sp500"]);
    }
}
