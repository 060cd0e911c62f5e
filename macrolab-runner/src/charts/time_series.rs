//! Line chart of every series against the shared date axis.

use super::{padded_range, Chart, ChartError, Theme};
use chrono::{Datelike, NaiveDate};
use macrolab_core::domain::TimeFrame;
use plotters::coord::Shift;
use plotters::prelude::*;

pub const DEFAULT_TITLE: &str = "Macro & Market Time Series";

const LEGEND_WIDTH: i32 = 220;

/// One line: the present observations of a column.
///
/// Missing rows are skipped rather than breaking the line, so a monthly
/// series merged with a daily one still draws as a connected line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Multi-line time-series figure with an external legend.
#[derive(Debug, Clone)]
pub struct TimeSeriesChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub lines: Vec<LineTrace>,
    pub theme: Theme,
}

impl TimeSeriesChart {
    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.label.as_str()).collect()
    }

    fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.0));
        let lo = dates.clone().min()?;
        let hi = dates.max()?;
        Some((lo, hi))
    }

    fn value_bounds(&self) -> (f64, f64) {
        let values = self.lines.iter().flat_map(|l| l.points.iter().map(|p| p.1));
        let lo = values.clone().fold(f64::INFINITY, f64::min);
        let hi = values.fold(f64::NEG_INFINITY, f64::max);
        padded_range(lo, hi, 0.05)
    }
}

/// Build the time-series figure for every column of `frame`.
pub fn plot_time_series(frame: &TimeFrame, title: Option<&str>) -> TimeSeriesChart {
    let lines = frame
        .columns()
        .iter()
        .map(|col| LineTrace {
            label: col.label.clone(),
            points: frame
                .index()
                .iter()
                .zip(&col.values)
                .filter_map(|(d, v)| v.map(|v| (*d, v)))
                .collect(),
        })
        .collect();

    TimeSeriesChart {
        title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        x_label: "Date".to_string(),
        y_label: "Value".to_string(),
        legend_title: "Series".to_string(),
        lines,
        theme: Theme::default(),
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn format_day(x: &f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl Chart for TimeSeriesChart {
    fn size(&self) -> (u32, u32) {
        (1200, 600)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        let theme = &self.theme;
        root.fill(&theme.background)?;

        let (width, _) = root.dim_in_pixel();
        let (plot_area, legend_area) = root.split_horizontally(width as i32 - LEGEND_WIDTH);

        let (x0, mut x1) = self
            .date_bounds()
            .map(|(lo, hi)| (day_number(lo), day_number(hi)))
            .unwrap_or((0.0, 1.0));
        if x1 <= x0 {
            x1 = x0 + 1.0;
        }
        let (y0, y1) = self.value_bounds();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&self.title, (theme.font, 24).into_font().color(&theme.text))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&format_day)
            .bold_line_style(theme.grid.stroke_width(1))
            .light_line_style(TRANSPARENT)
            .axis_style(theme.axis.stroke_width(1))
            .label_style((theme.font, 13).into_font().color(&theme.text))
            .draw()?;

        for (i, line) in self.lines.iter().enumerate() {
            let color = theme.series_color(i);
            chart.draw_series(LineSeries::new(
                line.points.iter().map(|(d, v)| (day_number(*d), *v)),
                color.stroke_width(2),
            ))?;
        }

        // Legend sits in its own strip to the right of the plot.
        legend_area.draw(&Text::new(
            self.legend_title.clone(),
            (12, 48),
            (theme.font, 16).into_font().color(&theme.text),
        ))?;
        let entry_style = (theme.font, 14).into_font().color(&theme.text);
        for (i, line) in self.lines.iter().enumerate() {
            let y = 80 + i as i32 * 24;
            legend_area.draw(&PathElement::new(
                vec![(12, y), (40, y)],
                theme.series_color(i).stroke_width(3),
            ))?;
            legend_area.draw(&Text::new(line.label.clone(), (48, y - 8), entry_style.clone()))?;
        }

        Ok(())
    }
}
