//! Property tests for table and statistics invariants.
//!
//! Uses proptest to verify:
//! 1. Outer alignment: index is the sorted union of source dates, one column per label
//! 2. Resampling: monthly means equal the mean of the month's present values
//! 3. Correlation: symmetric with unit diagonal for non-degenerate columns
//! 4. Quantiles: ordered and bounded by min/max

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use std::collections::BTreeSet;
use macrolab_core::data::{align_series, resample_monthly_mean};
use macrolab_core::domain::{Column, Observation, Series, TimeFrame};
use macrolab_core::stats::{self, correlation_matrix};

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_day_offsets() -> impl Strategy<Value = BTreeSet<u64>> {
    prop::collection::btree_set(0..900u64, 1..40)
}

fn arb_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        4 => (-1000.0..1000.0_f64).prop_map(Some),
        1 => Just(None),
    ]
}

fn arb_complete_column(rows: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec((-1000.0..1000.0_f64).prop_map(Some), rows)
}

fn series_from(id: &str, offsets: &BTreeSet<u64>, values: &[Option<f64>]) -> Series {
    Series::new(
        id,
        offsets
            .iter()
            .zip(values)
            .map(|(off, v)| Observation::new(origin() + Days::new(*off), *v))
            .collect(),
    )
}

fn daily_index(rows: usize) -> Vec<NaiveDate> {
    (0..rows as u64).map(|i| origin() + Days::new(i)).collect()
}

// ── 1. Outer alignment ───────────────────────────────────────────────

proptest! {
    #[test]
    fn alignment_index_is_union_of_dates(
        a in arb_day_offsets(),
        b in arb_day_offsets(),
        values in prop::collection::vec(arb_value(), 40),
    ) {
        let frame = align_series(vec![
            ("a".to_string(), series_from("A", &a, &values)),
            ("b".to_string(), series_from("B", &b, &values)),
        ]).unwrap();

        let expected: Vec<NaiveDate> = a
            .union(&b)
            .map(|off| origin() + Days::new(*off))
            .collect();

        prop_assert_eq!(frame.index(), expected.as_slice());
        prop_assert_eq!(frame.labels(), vec!["a", "b"]);
        for col in frame.columns() {
            prop_assert_eq!(col.values.len(), frame.n_rows());
        }

        // Every source observation survives in place.
        for (off, v) in a.iter().zip(&values) {
            let row = frame.index().iter().position(|d| *d == origin() + Days::new(*off)).unwrap();
            prop_assert_eq!(frame.column("a").unwrap().values[row], *v);
        }
    }
}

// ── 2. Resampling ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn monthly_mean_matches_bucket_mean(
        values in prop::collection::vec(arb_value(), 1..200),
    ) {
        let rows = values.len();
        let frame = TimeFrame::new(daily_index(rows), vec![Column::new("x", values.clone())]).unwrap();
        let monthly = resample_monthly_mean(&frame).unwrap();

        for (month_end, got) in monthly.index().iter().zip(&monthly.column("x").unwrap().values) {
            prop_assert!(month_end.succ_opt().unwrap().day() == 1);

            let in_month: Vec<f64> = frame
                .index()
                .iter()
                .zip(&values)
                .filter(|(d, _)| d.year() == month_end.year() && d.month() == month_end.month())
                .filter_map(|(_, v)| *v)
                .collect();

            match (stats::mean(&in_month), got) {
                (None, None) => {}
                (Some(expected), Some(actual)) => prop_assert!((expected - actual).abs() < 1e-9),
                (expected, actual) => prop_assert!(false, "expected {:?}, got {:?}", expected, actual),
            }
        }
    }
}

// ── 3. Correlation ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn correlation_symmetric_with_unit_diagonal(
        (a, b, c) in (3usize..50).prop_flat_map(|rows| (
            arb_complete_column(rows),
            arb_complete_column(rows),
            arb_complete_column(rows),
        )),
    ) {
        for col in [&a, &b, &c] {
            let present: Vec<f64> = col.iter().flatten().copied().collect();
            prop_assume!(stats::std_dev(&present).unwrap() > 1e-6);
        }

        let frame = TimeFrame::new(
            daily_index(a.len()),
            vec![Column::new("a", a), Column::new("b", b), Column::new("c", c)],
        ).unwrap();
        let m = correlation_matrix(&frame);

        for i in 0..m.len() {
            prop_assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.len() {
                prop_assert_eq!(m.get(i, j), m.get(j, i));
                prop_assert!(m.get(i, j) >= -1.0 && m.get(i, j) <= 1.0);
            }
        }
    }
}

// ── 4. Quantiles ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn quartiles_are_ordered_and_bounded(
        values in prop::collection::vec(-1e6..1e6_f64, 1..100),
    ) {
        let lo = stats::min(&values).unwrap();
        let hi = stats::max(&values).unwrap();
        let q1 = stats::quantile(&values, 0.25).unwrap();
        let q2 = stats::quantile(&values, 0.5).unwrap();
        let q3 = stats::quantile(&values, 0.75).unwrap();

        prop_assert!(lo <= q1 && q1 <= q2 && q2 <= q3 && q3 <= hi);
        prop_assert_eq!(stats::quantile(&values, 0.0).unwrap(), lo);
        prop_assert_eq!(stats::quantile(&values, 1.0).unwrap(), hi);
    }
}
