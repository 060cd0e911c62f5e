//! Fetcher: download several labelled series and merge them into one table.

use super::align::align_series;
use super::provider::{DataError, SeriesProvider};
use crate::domain::TimeFrame;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::info;

/// One requested series: the column label and the provider identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub label: String,
    pub series_id: String,
}

impl SeriesRequest {
    pub fn new(label: impl Into<String>, series_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            series_id: series_id.into(),
        }
    }
}

/// What to fetch and over which range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Requested series, in output column order.
    pub series: Vec<SeriesRequest>,
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Inclusive end date. `None` means today.
    pub end: Option<NaiveDate>,
}

impl FetchRequest {
    pub fn new<L, I>(series: impl IntoIterator<Item = (L, I)>, start: NaiveDate) -> Self
    where
        L: Into<String>,
        I: Into<String>,
    {
        Self {
            series: series
                .into_iter()
                .map(|(label, id)| SeriesRequest::new(label, id))
                .collect(),
            start,
            end: None,
        }
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Start date used when a caller has no preference.
    pub fn default_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).expect("2000-01-01 is a valid date")
    }

    /// The end date, defaulting to today's local date.
    pub fn resolved_end(&self) -> NaiveDate {
        self.end
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn validate(&self, end: NaiveDate) -> Result<(), DataError> {
        if self.series.is_empty() {
            return Err(DataError::EmptyRequest);
        }
        if self.start > end {
            return Err(DataError::InvalidRange {
                start: self.start,
                end,
            });
        }
        let mut seen = HashSet::new();
        for req in &self.series {
            if !seen.insert(req.label.as_str()) {
                return Err(DataError::DuplicateLabel(req.label.clone()));
            }
        }
        Ok(())
    }
}

/// Fetch every requested series and outer-join them on date.
///
/// Series are fetched one after another; the first failure aborts the whole
/// fetch and is returned unchanged.
pub fn fetch_series(
    provider: &dyn SeriesProvider,
    request: &FetchRequest,
) -> Result<TimeFrame, DataError> {
    let end = request.resolved_end();
    request.validate(end)?;

    let mut labelled = Vec::with_capacity(request.series.len());
    for req in &request.series {
        let series = provider.fetch(&req.series_id, request.start, end)?;
        info!(
            provider = provider.name(),
            label = %req.label,
            series_id = %req.series_id,
            observations = series.len(),
            "fetched series"
        );
        labelled.push((req.label.clone(), series));
    }

    let frame = align_series(labelled)?;
    info!(
        rows = frame.n_rows(),
        columns = frame.n_cols(),
        "merged series on date index"
    );
    Ok(frame)
}
