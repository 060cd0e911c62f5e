//! Histogram with a density overlay, one stacked panel per column.

use super::{padded_range, Chart, ChartError, Theme};
use macrolab_core::domain::{Column, TimeFrame};
use macrolab_core::stats::{GaussianKde, Histogram};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Density curve resolution.
const KDE_POINTS: usize = 200;
const PANEL_HEIGHT: u32 = 300;

/// One column's distribution.
#[derive(Debug, Clone)]
pub struct DistributionPanel {
    pub label: String,
    pub title: String,
    pub histogram: Histogram,
    /// KDE scaled to histogram counts (density × n × bin width).
    /// Empty when the density is undefined.
    pub density: Vec<(f64, f64)>,
}

impl DistributionPanel {
    fn from_values(label: &str, values: &[f64]) -> Self {
        let histogram = Histogram::auto(values);
        let density = match GaussianKde::scott(values) {
            Some(kde) => {
                let scale = values.len() as f64 * histogram.bin_width();
                let lo = histogram.edges[0];
                let hi = histogram.edges[histogram.n_bins()];
                kde.grid(lo, hi, KDE_POINTS)
                    .into_iter()
                    .map(|(x, y)| (x, y * scale))
                    .collect()
            }
            None => Vec::new(),
        };

        Self {
            label: label.to_string(),
            title: format!("Distribution of {label}"),
            histogram,
            density,
        }
    }

    fn y_max(&self) -> f64 {
        let peak = self
            .density
            .iter()
            .map(|p| p.1)
            .fold(self.histogram.max_count() as f64, f64::max);
        if peak > 0.0 {
            peak * 1.1
        } else {
            1.0
        }
    }
}

/// Vertically stacked distribution panels.
#[derive(Debug, Clone)]
pub struct DistributionChart {
    pub panels: Vec<DistributionPanel>,
    pub theme: Theme,
}

impl DistributionChart {
    pub fn n_panels(&self) -> usize {
        self.panels.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.label.as_str()).collect()
    }
}

/// Resolve a distribution selection against `frame`, in requested order.
///
/// `None` selects every column. An empty selection, or a label the table
/// does not have, is an error.
pub fn select_columns<'a>(
    frame: &'a TimeFrame,
    columns: Option<&[&str]>,
) -> Result<Vec<&'a Column>, ChartError> {
    let selected: Vec<&Column> = match columns {
        Some(labels) => labels
            .iter()
            .map(|label| {
                frame
                    .column(label)
                    .ok_or_else(|| ChartError::UnknownColumn(label.to_string()))
            })
            .collect::<Result<_, _>>()?,
        None => frame.columns().iter().collect(),
    };
    if selected.is_empty() {
        return Err(ChartError::EmptySelection);
    }
    Ok(selected)
}

/// Build one distribution panel per selected column.
///
/// `columns` defaults to every column in table order. An explicitly empty
/// selection, or a label the table does not have, is an error.
pub fn plot_distribution(
    frame: &TimeFrame,
    columns: Option<&[&str]>,
) -> Result<DistributionChart, ChartError> {
    let panels = select_columns(frame, columns)?
        .into_iter()
        .map(|column| DistributionPanel::from_values(&column.label, &column.present()))
        .collect();

    Ok(DistributionChart {
        panels,
        theme: Theme::default(),
    })
}

impl Chart for DistributionChart {
    fn size(&self) -> (u32, u32) {
        (800, PANEL_HEIGHT * self.panels.len().max(1) as u32)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        let theme = &self.theme;
        root.fill(&theme.background)?;

        let areas = root.split_evenly((self.panels.len().max(1), 1));
        for (i, (panel, area)) in self.panels.iter().zip(&areas).enumerate() {
            let color = theme.series_color(i);
            let lo = panel.histogram.edges[0];
            let hi = panel.histogram.edges[panel.histogram.n_bins()];
            let (x0, x1) = padded_range(lo, hi, 0.02);

            let mut chart = ChartBuilder::on(area)
                .caption(&panel.title, (theme.font, 18).into_font().color(&theme.text))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(50)
                .build_cartesian_2d(x0..x1, 0.0..panel.y_max())?;

            chart
                .configure_mesh()
                .x_desc(panel.label.as_str())
                .y_desc("Count")
                .bold_line_style(theme.grid.stroke_width(1))
                .light_line_style(TRANSPARENT)
                .axis_style(theme.axis.stroke_width(1))
                .label_style((theme.font, 12).into_font().color(&theme.text))
                .draw()?;

            chart.draw_series(panel.histogram.bins().map(|(left, right, count)| {
                Rectangle::new([(left, 0.0), (right, count as f64)], color.mix(0.55).filled())
            }))?;
            chart.draw_series(panel.histogram.bins().map(|(left, right, count)| {
                Rectangle::new([(left, 0.0), (right, count as f64)], theme.background.stroke_width(1))
            }))?;

            if !panel.density.is_empty() {
                chart.draw_series(LineSeries::new(
                    panel.density.iter().copied(),
                    color.stroke_width(2),
                ))?;
            }
        }

        Ok(())
    }
}
