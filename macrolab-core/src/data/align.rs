//! Multi-series time alignment.
//!
//! Given labelled series, align them to the union of their dates (outer
//! join). Dates a series does not report get the "no value" marker; nothing
//! is forward-filled.

use crate::domain::{Column, FrameError, Series, TimeFrame};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Outer-join labelled series on date.
///
/// Columns keep the input order. If a series repeats a date, the last
/// observation for that date wins.
pub fn align_series(labelled: Vec<(String, Series)>) -> Result<TimeFrame, FrameError> {
    // Collect the union of all dates
    let dates: Vec<NaiveDate> = labelled
        .iter()
        .flat_map(|(_, s)| s.observations.iter().map(|o| o.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = labelled
        .into_iter()
        .map(|(label, series)| {
            let by_date: HashMap<NaiveDate, Option<f64>> = series
                .observations
                .into_iter()
                .map(|o| (o.date, o.value))
                .collect();

            let values = dates
                .iter()
                .map(|date| by_date.get(date).copied().flatten())
                .collect();

            Column::new(label, values)
        })
        .collect();

    TimeFrame::new(dates, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(id: &str, points: &[(&str, Option<f64>)]) -> Series {
        Series::new(
            id,
            points
                .iter()
                .map(|(date, v)| Observation::new(d(date), *v))
                .collect(),
        )
    }

    #[test]
    fn align_fills_missing_with_none() {
        let aligned = align_series(vec![
            (
                "spy".into(),
                series(
                    "SPY",
                    &[
                        ("2024-01-02", Some(100.0)),
                        ("2024-01-03", Some(101.0)),
                        ("2024-01-04", Some(102.0)),
                    ],
                ),
            ),
            (
                "qqq".into(),
                series("QQQ", &[("2024-01-02", Some(200.0)), ("2024-01-04", Some(202.0))]),
            ),
        ])
        .unwrap();

        assert_eq!(aligned.n_rows(), 3);
        assert_eq!(aligned.column("spy").unwrap().values[1], Some(101.0));
        assert_eq!(aligned.column("qqq").unwrap().values[1], None);
    }

    #[test]
    fn index_is_sorted_union_even_for_unsorted_input() {
        let aligned = align_series(vec![
            (
                "monthly".into(),
                series("M", &[("2024-02-01", Some(2.0)), ("2024-01-01", Some(1.0))]),
            ),
            ("daily".into(), series("D", &[("2024-01-15", Some(9.0))])),
        ])
        .unwrap();

        assert_eq!(
            aligned.index(),
            &[d("2024-01-01"), d("2024-01-15"), d("2024-02-01")]
        );
        assert_eq!(aligned.labels(), vec!["monthly", "daily"]);
        assert_eq!(
            aligned.column("monthly").unwrap().values,
            vec![Some(1.0), None, Some(2.0)]
        );
    }

    #[test]
    fn duplicate_date_last_wins() {
        let aligned = align_series(vec![(
            "x".into(),
            series("X", &[("2024-01-01", Some(1.0)), ("2024-01-01", Some(5.0))]),
        )])
        .unwrap();
        assert_eq!(aligned.n_rows(), 1);
        assert_eq!(aligned.column("x").unwrap().values, vec![Some(5.0)]);
    }

    #[test]
    fn duplicate_labels_rejected() {
        let err = align_series(vec![
            ("x".into(), series("A", &[("2024-01-01", Some(1.0))])),
            ("x".into(), series("B", &[("2024-01-01", Some(2.0))])),
        ])
        .unwrap_err();
        assert_eq!(err, FrameError::DuplicateLabel("x".into()));
    }
}
