//! Annotated correlation heatmap on a monthly grid.

use super::{Chart, ChartError, Theme};
use macrolab_core::data::resample_monthly_mean;
use macrolab_core::domain::TimeFrame;
use macrolab_core::stats::{correlation_matrix, CorrelationMatrix};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const DEFAULT_TITLE: &str = "Correlation (monthly freq)";

const LABEL_WIDTH: i32 = 150;
const LABEL_HEIGHT: i32 = 70;
const COLORBAR_WIDTH: i32 = 90;
const TOP_PAD: i32 = 10;
const COLORBAR_STEPS: i32 = 50;

/// Square heatmap of pairwise correlations.
#[derive(Debug, Clone)]
pub struct CorrelationHeatmap {
    pub title: String,
    pub matrix: CorrelationMatrix,
    pub theme: Theme,
}

impl CorrelationHeatmap {
    /// Cell annotation; `None` for undefined correlations.
    pub fn annotation(&self, row: usize, col: usize) -> Option<String> {
        let v = self.matrix.get(row, col);
        v.is_finite().then(|| format!("{v:.2}"))
    }
}

/// Resample to months, correlate, and build the heatmap figure.
pub fn plot_correlation_heatmap(
    frame: &TimeFrame,
    title: Option<&str>,
) -> Result<CorrelationHeatmap, ChartError> {
    let monthly = resample_monthly_mean(frame)?;
    Ok(CorrelationHeatmap {
        title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        matrix: correlation_matrix(&monthly),
        theme: Theme::default(),
    })
}

impl Chart for CorrelationHeatmap {
    fn size(&self) -> (u32, u32) {
        (700, 500)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        let theme = &self.theme;
        root.fill(&theme.background)?;
        let area = root.titled(&self.title, (theme.font, 22).into_font().color(&theme.text))?;

        let n = self.matrix.len() as i32;
        if n == 0 {
            return Ok(());
        }

        let (w, h) = area.dim_in_pixel();
        let cell = ((w as i32 - LABEL_WIDTH - COLORBAR_WIDTH) / n)
            .min((h as i32 - TOP_PAD - LABEL_HEIGHT) / n)
            .max(1);
        let grid_size = cell * n;

        let label_style = (theme.font, 13).into_font().color(&theme.text);
        let centered = Pos::new(HPos::Center, VPos::Center);

        for (i, row_label) in self.matrix.labels.iter().enumerate() {
            let y = TOP_PAD + i as i32 * cell;
            for j in 0..self.matrix.len() {
                let x = LABEL_WIDTH + j as i32 * cell;
                let v = self.matrix.get(i, j);
                area.draw(&Rectangle::new(
                    [(x, y), (x + cell, y + cell)],
                    theme.diverging(v).filled(),
                ))?;

                if let Some(text) = self.annotation(i, j) {
                    let color = if v.abs() > 0.6 { theme.background } else { theme.text };
                    area.draw(&Text::new(
                        text,
                        (x + cell / 2, y + cell / 2),
                        (theme.font, 14).into_font().color(&color).pos(centered),
                    ))?;
                }
            }

            area.draw(&Text::new(
                row_label.clone(),
                (LABEL_WIDTH - 8, y + cell / 2),
                label_style.clone().pos(Pos::new(HPos::Right, VPos::Center)),
            ))?;
        }

        // Column labels, staggered so long names do not collide.
        for (j, col_label) in self.matrix.labels.iter().enumerate() {
            let stagger = if j % 2 == 0 { 0 } else { 18 };
            area.draw(&Text::new(
                col_label.clone(),
                (LABEL_WIDTH + j as i32 * cell + cell / 2, TOP_PAD + grid_size + 8 + stagger),
                label_style.clone().pos(Pos::new(HPos::Center, VPos::Top)),
            ))?;
        }

        // Colour bar from +1 (top) to -1 (bottom).
        let bar_x = LABEL_WIDTH + grid_size + 20;
        let step = (grid_size as f64 / COLORBAR_STEPS as f64).max(1.0);
        for s in 0..COLORBAR_STEPS {
            let v = 1.0 - 2.0 * (s as f64 + 0.5) / COLORBAR_STEPS as f64;
            let y0 = TOP_PAD + (s as f64 * step) as i32;
            let y1 = TOP_PAD + ((s + 1) as f64 * step) as i32;
            area.draw(&Rectangle::new(
                [(bar_x, y0), (bar_x + 18, y1)],
                theme.diverging(v).filled(),
            ))?;
        }
        for (text, y) in [
            ("1.0", TOP_PAD),
            ("0.0", TOP_PAD + grid_size / 2),
            ("-1.0", TOP_PAD + grid_size),
        ] {
            area.draw(&Text::new(
                text,
                (bar_x + 24, y),
                label_style.clone().pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;
        }

        Ok(())
    }
}
