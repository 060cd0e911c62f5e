//! Exploratory charts.
//!
//! Each plot function builds a figure value (the data to draw, already
//! computed) and returns it without touching the filesystem. Rendering is a
//! separate step through the [`Chart`] trait, which draws onto any
//! `plotters` backend and writes SVG.

pub mod distribution;
pub mod heatmap;
pub mod theme;
pub mod time_series;

pub use distribution::{plot_distribution, select_columns, DistributionChart, DistributionPanel};
pub use heatmap::{plot_correlation_heatmap, CorrelationHeatmap};
pub use theme::Theme;
pub use time_series::{plot_time_series, LineTrace, TimeSeriesChart};

use macrolab_core::domain::FrameError;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from building or rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no columns selected for plotting")]
    EmptySelection,

    #[error("no column labelled '{0}'")]
    UnknownColumn(String),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("write chart {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

/// A figure that can be drawn and saved.
pub trait Chart {
    /// Canvas size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw the figure onto `root`, which covers the whole canvas.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError>;

    /// Render to an SVG document.
    fn render_svg(&self) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Render to SVG and write it to `path`.
    fn save(&self, path: &Path) -> Result<(), ChartError> {
        let svg = self.render_svg()?;
        std::fs::write(path, svg).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `[lo, hi]` widened by `pad` of its span on each side; degenerate and
/// empty ranges become a unit-wide window.
pub(crate) fn padded_range(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= 0.0 {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * pad, hi + span * pad)
}
