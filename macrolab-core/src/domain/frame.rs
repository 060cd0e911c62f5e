//! Time-indexed table: one shared date axis, one column per series label.
//!
//! Invariants (checked by [`TimeFrame::new`]):
//! - the date index is strictly ascending (unique dates)
//! - every column has exactly one slot per index date
//! - column labels are unique
//!
//! Missing observations are stored as `None` rather than being omitted, so
//! the columns always line up row for row. A `TimeFrame` is never mutated
//! after construction; transformations return a new frame.

use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

/// Violations of the table construction invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrameError {
    #[error("column '{label}' has {actual} values but the index has {expected} dates")]
    LengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("date index is not strictly ascending at row {row}")]
    UnsortedIndex { row: usize },

    #[error("duplicate column label '{0}'")]
    DuplicateLabel(String),

    #[error("no column labelled '{0}'")]
    UnknownColumn(String),
}

/// A labelled column of optional values aligned to a frame's index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Present values in index order, with the "no value" entries dropped.
    pub fn present(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// First index date holding a value.
    pub fn first_valid_date(&self, index: &[NaiveDate]) -> Option<NaiveDate> {
        self.values
            .iter()
            .zip(index)
            .find(|(v, _)| v.is_some())
            .map(|(_, d)| *d)
    }

    /// Last index date holding a value.
    pub fn last_valid_date(&self, index: &[NaiveDate]) -> Option<NaiveDate> {
        self.values
            .iter()
            .zip(index)
            .rev()
            .find(|(v, _)| v.is_some())
            .map(|(_, d)| *d)
    }
}

/// Date-indexed table of series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeFrame {
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeFrame {
    /// Build a frame, validating the index order, column lengths and labels.
    pub fn new(index: Vec<NaiveDate>, columns: Vec<Column>) -> Result<Self, FrameError> {
        if let Some(row) = index.windows(2).position(|w| w[0] >= w[1]) {
            return Err(FrameError::UnsortedIndex { row: row + 1 });
        }

        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.label.as_str()) {
                return Err(FrameError::DuplicateLabel(col.label.clone()));
            }
            if col.values.len() != index.len() {
                return Err(FrameError::LengthMismatch {
                    label: col.label.clone(),
                    expected: index.len(),
                    actual: col.values.len(),
                });
            }
        }

        Ok(Self { index, columns })
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    /// New frame holding only the named columns, in the order given.
    pub fn select(&self, labels: &[&str]) -> Result<TimeFrame, FrameError> {
        let columns = labels
            .iter()
            .map(|label| {
                self.column(label)
                    .cloned()
                    .ok_or_else(|| FrameError::UnknownColumn(label.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        TimeFrame::new(self.index.clone(), columns)
    }

    /// First and last index dates, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.index.first()?, *self.index.last()?))
    }
}
