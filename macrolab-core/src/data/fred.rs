//! FRED (Federal Reserve Economic Data) provider.
//!
//! Fetches a single series from the public graph CSV endpoint, which needs
//! no API key. The response looks like:
//!
//! ```text
//! observation_date,UNRATE
//! 2020-01-01,3.6
//! 2020-02-01,.
//! ```
//!
//! Older deployments label the date column `DATE`; only the column position
//! matters here. A value of `.` (or an empty cell) is a missing observation.
//!
//! No retry or backoff: transport and HTTP failures are returned as-is.

use super::provider::{DataError, SeriesProvider};
use crate::domain::{Observation, Series};
use chrono::NaiveDate;
use std::time::Duration;
use tracing::debug;

/// Public graph CSV endpoint.
pub const FRED_GRAPH_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// FRED data provider.
pub struct FredProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl FredProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("macrolab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: FRED_GRAPH_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Query parameters for one series over a date range.
    fn query(series_id: &str, start: NaiveDate, end: NaiveDate) -> [(&'static str, String); 3] {
        [
            ("id", series_id.to_string()),
            ("cosd", start.format(DATE_FORMAT).to_string()),
            ("coed", end.format(DATE_FORMAT).to_string()),
        ]
    }
}

impl SeriesProvider for FredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Series, DataError> {
        let query = Self::query(series_id, start, end);
        debug!(url = %self.base_url, series_id, %start, %end, "requesting FRED series");

        let resp = self.client.get(&self.base_url).query(&query).send()?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            return Err(DataError::SeriesNotFound {
                series_id: series_id.to_string(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                series_id: series_id.to_string(),
            });
        }

        let body = resp.error_for_status()?.text()?;
        let series = parse_fredgraph_csv(series_id, &body)?;

        // The endpoint has been seen to ignore cosd/coed; clip locally.
        Ok(series.within(start, end))
    }
}

/// Parse a FRED graph CSV body into a [`Series`].
pub fn parse_fredgraph_csv(series_id: &str, body: &str) -> Result<Series, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(DataError::ResponseFormatChanged(format!(
            "expected a date and a value column for {series_id}, got header {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut observations = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let raw_date = record.get(0).unwrap_or_default();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
            DataError::ResponseFormatChanged(format!(
                "invalid date '{raw_date}' for {series_id}: {e}"
            ))
        })?;
        let value = parse_value(series_id, record.get(1).unwrap_or_default())?;
        observations.push(Observation::new(date, value));
    }

    Ok(Series::new(series_id, observations))
}

fn parse_value(series_id: &str, raw: &str) -> Result<Option<f64>, DataError> {
    if raw.is_empty() || raw == "." {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|e| {
        DataError::ResponseFormatChanged(format!("invalid value '{raw}' for {series_id}: {e}"))
    })?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_current_header_and_missing_dots() {
        let body = "observation_date,SP500\n2020-01-02,3257.85\n2020-01-03,.\n2020-01-06,3246.28\n";
        let series = parse_fredgraph_csv("SP500", body).unwrap();

        assert_eq!(series.id, "SP500");
        assert_eq!(series.len(), 3);
        assert_eq!(series.observations[0].date, d("2020-01-02"));
        assert_eq!(series.observations[0].value, Some(3257.85));
        assert_eq!(series.observations[1].value, None);
    }

    #[test]
    fn parses_legacy_date_header() {
        let body = "DATE,UNRATE\n2020-01-01,3.6\n2020-02-01,3.5\n";
        let series = parse_fredgraph_csv("UNRATE", body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations[1].value, Some(3.5));
    }

    #[test]
    fn empty_cell_is_missing() {
        let body = "observation_date,X\n2020-01-01,\n";
        let series = parse_fredgraph_csv("X", body).unwrap();
        assert_eq!(series.observations[0].value, None);
    }

    #[test]
    fn rejects_html_error_page() {
        let body = "<html>\n<body>Series does not exist.</body>\n</html>\n";
        assert!(parse_fredgraph_csv("NOPE", body).is_err());
    }

    #[test]
    fn rejects_garbage_value() {
        let body = "observation_date,X\n2020-01-01,abc\n";
        let err = parse_fredgraph_csv("X", body).unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn query_uses_iso_dates() {
        let q = FredProvider::query("CPIAUCSL", d("2010-01-01"), d("2024-06-30"));
        assert_eq!(q[0], ("id", "CPIAUCSL".to_string()));
        assert_eq!(q[1], ("cosd", "2010-01-01".to_string()));
        assert_eq!(q[2], ("coed", "2024-06-30".to_string()));
    }
}
