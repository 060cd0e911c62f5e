//! Histogram binning and Gaussian kernel density estimation.

use super::{quantile_sorted, sorted, std_dev};
use std::f64::consts::PI;

/// Upper bound on automatically chosen bin counts.
pub const MAX_BINS: usize = 1_000;

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` of them, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Histogram with an automatically chosen bin width.
    ///
    /// The width is the smaller of the Sturges and Freedman–Diaconis widths
    /// (i.e. the larger bin count); Sturges alone is used when the
    /// interquartile range is zero or the Freedman–Diaconis count would exceed
    /// [`MAX_BINS`]. Constant data gets a single unit-wide bin centred on the
    /// value.
    pub fn auto(values: &[f64]) -> Self {
        let sorted = sorted(values);
        let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
            return Self {
                edges: vec![0.0, 1.0],
                counts: vec![0],
            };
        };

        if hi - lo <= 0.0 {
            return Self {
                edges: vec![lo - 0.5, hi + 0.5],
                counts: vec![sorted.len()],
            };
        }

        let bins = auto_bin_count(&sorted, hi - lo);
        Self::with_bins(&sorted, lo, hi, bins)
    }

    fn with_bins(values: &[f64], lo: f64, hi: f64, bins: usize) -> Self {
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for v in values {
            // The last bin is closed on the right.
            let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Self { edges, counts }
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(left edge, right edge, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| (e[0], e[1], c))
    }
}

fn auto_bin_count(sorted: &[f64], range: f64) -> usize {
    let n = sorted.len() as f64;
    let sturges_width = range / (n.log2() + 1.0);

    let iqr = match (quantile_sorted(sorted, 0.75), quantile_sorted(sorted, 0.25)) {
        (Some(q3), Some(q1)) => q3 - q1,
        _ => 0.0,
    };
    let fd_width = 2.0 * iqr * n.powf(-1.0 / 3.0);

    let sturges_bins = ((range / sturges_width).ceil() as usize).clamp(1, MAX_BINS);
    if fd_width <= 0.0 {
        return sturges_bins;
    }

    // A single outlier stretches the range far past the IQR; the
    // Freedman–Diaconis count is then unusable.
    let fd_bins = (range / fd_width).ceil();
    if fd_bins > MAX_BINS as f64 {
        sturges_bins
    } else {
        (fd_bins as usize).max(sturges_bins)
    }
}

/// Gaussian kernel density estimate with Scott's rule bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit to `values`. Returns `None` when the density is undefined
    /// (fewer than two values or zero spread).
    pub fn scott(values: &[f64]) -> Option<Self> {
        let sd = std_dev(values)?;
        if sd <= 0.0 || !sd.is_finite() {
            return None;
        }
        let bandwidth = sd * (values.len() as f64).powf(-0.2);
        Some(Self {
            points: values.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`; integrates to 1 over the real line.
    pub fn density(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * PI).sqrt());
        norm * self
            .points
            .iter()
            .map(|p| (-0.5 * ((x - p) / h).powi(2)).exp())
            .sum::<f64>()
    }

    /// Evaluate on `n` evenly spaced points over `[lo, hi]`.
    pub fn grid(&self, lo: f64, hi: f64, n: usize) -> Vec<(f64, f64)> {
        if n < 2 {
            return vec![(lo, self.density(lo))];
        }
        let step = (hi - lo) / (n - 1) as f64;
        (0..n)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.density(x))
            })
            .collect()
    }
}
