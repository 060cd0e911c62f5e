//! Per-series summary statistics and their CSV export.
//!
//! One row per column of the merged table: the usual descriptive statistics
//! over the present values, plus the share of missing rows and the first and
//! last dates that carry a value. Statistics that are undefined for a column
//! (every value missing, a standard deviation from one value) are left
//! empty rather than guarded.

use chrono::NaiveDate;
use macrolab_core::domain::{Column, TimeFrame};
use macrolab_core::stats;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from writing the summary table.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("write summary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("summary CSV is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Descriptive statistics for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub label: String,
    /// Number of present values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
    /// Missing rows as a percentage of all rows.
    pub missing_pct: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SeriesSummary {
    fn from_column(column: &Column, index: &[NaiveDate]) -> Self {
        let present = column.present();
        let sorted = stats::sorted(&present);
        let rows = column.values.len();

        Self {
            label: column.label.clone(),
            count: present.len(),
            mean: stats::mean(&present),
            std: stats::std_dev(&present),
            min: sorted.first().copied(),
            q25: stats::quantile_sorted(&sorted, 0.25),
            median: stats::quantile_sorted(&sorted, 0.5),
            q75: stats::quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied(),
            missing_pct: (rows > 0).then(|| column.missing_count() as f64 / rows as f64 * 100.0),
            start_date: column.first_valid_date(index),
            end_date: column.last_valid_date(index),
        }
    }
}

/// Summary rows in the table's column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    pub rows: Vec<SeriesSummary>,
}

const CSV_HEADER: [&str; 12] = [
    "series",
    "count",
    "mean",
    "std",
    "min",
    "25%",
    "50%",
    "75%",
    "max",
    "missing_pct",
    "start_date",
    "end_date",
];

impl SummaryTable {
    pub fn get(&self, label: &str) -> Option<&SeriesSummary> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn write_records<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<(), csv::Error> {
        wtr.write_record(CSV_HEADER)?;
        for r in &self.rows {
            wtr.write_record([
                r.label.clone(),
                r.count.to_string(),
                fmt_opt(r.mean),
                fmt_opt(r.std),
                fmt_opt(r.min),
                fmt_opt(r.q25),
                fmt_opt(r.median),
                fmt_opt(r.q75),
                fmt_opt(r.max),
                fmt_opt(r.missing_pct),
                fmt_date(r.start_date),
                fmt_date(r.end_date),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render the table as CSV. Absent statistics are empty cells.
    pub fn to_csv(&self) -> Result<String, SummaryError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        self.write_records(&mut wtr)?;
        let data = wtr.into_inner().map_err(|e| SummaryError::Io {
            path: PathBuf::from("<memory>"),
            source: e.into_error(),
        })?;
        Ok(String::from_utf8(data)?)
    }

    /// Write the table as CSV to `path`.
    pub fn write_csv(&self, path: &Path) -> Result<(), SummaryError> {
        let csv = self.to_csv()?;
        std::fs::write(path, csv).map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn fmt_date(d: Option<NaiveDate>) -> String {
    d.map(|x| x.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Summarize every column of the merged table.
pub fn summarize(frame: &TimeFrame) -> SummaryTable {
    SummaryTable {
        rows: frame
            .columns()
            .iter()
            .map(|col| SeriesSummary::from_column(col, frame.index()))
            .collect(),
    }
}
