//! Series provider trait and structured error types.
//!
//! The `SeriesProvider` trait is the seam between the fetcher and the
//! upstream source. FRED is the only network implementation; the in-memory
//! `StaticProvider` exists so tests can run the pipeline without a network.

use crate::domain::{FrameError, Series};
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

/// Structured error types for data operations.
///
/// Library failures are wrapped transparently so callers see the underlying
/// error message unchanged.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("rate limited by provider while fetching '{series_id}'")]
    RateLimited { series_id: String },

    #[error("series not found: {series_id}")]
    SeriesNotFound { series_id: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("no series requested")]
    EmptyRequest,

    #[error("duplicate series label '{0}'")]
    DuplicateLabel(String),

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Trait for time-series providers.
///
/// Implementations return the raw observations of one series identifier
/// over an inclusive date range. Missing values stay in the response as
/// `None`; the provider does not fill or drop them.
pub trait SeriesProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch one series over `[start, end]`.
    fn fetch(&self, series_id: &str, start: NaiveDate, end: NaiveDate)
        -> Result<Series, DataError>;
}

/// In-memory provider backed by a fixed set of series.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, Series>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own identifier.
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.insert(series.id.clone(), series);
        self
    }
}

impl SeriesProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, DataError> {
        self.series
            .get(series_id)
            .cloned()
            .map(|s| s.within(start, end))
            .ok_or_else(|| DataError::SeriesNotFound {
                series_id: series_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn static_provider_clips_to_range() {
        let provider = StaticProvider::new().with_series(Series::new(
            "ID1",
            vec![
                Observation::new(d("2019-12-31"), Some(0.0)),
                Observation::new(d("2020-01-01"), Some(1.0)),
            ],
        ));

        let s = provider.fetch("ID1", d("2020-01-01"), d("2020-12-31")).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.observations[0].value, Some(1.0));
    }

    #[test]
    fn static_provider_unknown_id() {
        let provider = StaticProvider::new();
        let err = provider
            .fetch("NOPE", d("2020-01-01"), d("2020-12-31"))
            .unwrap_err();
        assert!(matches!(err, DataError::SeriesNotFound { series_id } if series_id == "NOPE"));
    }
}
