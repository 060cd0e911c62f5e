//! Chart styling shared by every figure.
//!
//! # Palette
//! - **Background**: white
//! - **Grid**: light grey lines behind the data
//! - **Series**: ten muted categorical colours, cycled by column position
//! - **Diverging scale**: blue (−1) → near-white (0) → red (+1)

use plotters::style::RGBColor;

/// Visual defaults for all charts.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: RGBColor,
    pub grid: RGBColor,
    pub axis: RGBColor,
    pub text: RGBColor,
    pub palette: [RGBColor; 10],
    pub negative: RGBColor,
    pub midpoint: RGBColor,
    pub positive: RGBColor,
    /// Cells with no value (undefined correlation).
    pub undefined: RGBColor,
    pub font: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::whitegrid()
    }
}

impl Theme {
    /// White background with a light grid.
    pub fn whitegrid() -> Self {
        Self {
            background: RGBColor(255, 255, 255),
            grid: RGBColor(221, 221, 221),
            axis: RGBColor(204, 204, 204),
            text: RGBColor(38, 38, 38),
            palette: [
                RGBColor(76, 114, 176),
                RGBColor(221, 132, 82),
                RGBColor(85, 168, 104),
                RGBColor(196, 78, 82),
                RGBColor(129, 114, 179),
                RGBColor(147, 120, 96),
                RGBColor(218, 139, 195),
                RGBColor(140, 140, 140),
                RGBColor(204, 185, 116),
                RGBColor(100, 181, 205),
            ],
            negative: RGBColor(33, 102, 172),
            midpoint: RGBColor(247, 247, 247),
            positive: RGBColor(178, 24, 43),
            undefined: RGBColor(230, 230, 230),
            font: "sans-serif",
        }
    }

    /// Categorical colour for the `i`-th series.
    pub fn series_color(&self, i: usize) -> RGBColor {
        self.palette[i % self.palette.len()]
    }

    /// Diverging colour for `value` on a scale fixed to [−1, 1], centred at 0.
    pub fn diverging(&self, value: f64) -> RGBColor {
        if !value.is_finite() {
            return self.undefined;
        }
        let t = value.clamp(-1.0, 1.0);
        if t < 0.0 {
            lerp(self.midpoint, self.negative, -t)
        } else {
            lerp(self.midpoint, self.positive, t)
        }
    }
}

fn lerp(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
