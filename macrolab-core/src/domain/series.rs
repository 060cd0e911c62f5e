//! A single provider series: dated observations with optional values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated observation. `None` is the "no value" marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// Raw response from a data provider for one series identifier.
///
/// Observations are kept in the order the provider returned them; alignment
/// sorts and de-duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Provider series identifier (e.g. `UNRATE`).
    pub id: String,
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(id: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            id: id.into(),
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Keep only observations with `start <= date <= end`.
    pub fn within(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.observations
            .retain(|obs| obs.date >= start && obs.date <= end);
        self
    }
}
