//! Property tests for the summary table.
//!
//! Uses proptest to verify, for any column:
//! 1. `count` plus the missing rows equals the row count
//! 2. `missing_pct` lies in [0, 100]
//! 3. Quartiles are ordered and bounded by min/max
//! 4. First/last valid dates are present exactly when `count > 0`

use chrono::{Days, NaiveDate};
use macrolab_core::domain::{Column, TimeFrame};
use macrolab_runner::summarize;
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => (-1e6..1e6_f64).prop_map(Some),
        1 => Just(None),
    ]
}

fn frame_from(values: Vec<Option<f64>>) -> TimeFrame {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let index = (0..values.len() as u64)
        .map(|i| start + Days::new(i))
        .collect();
    TimeFrame::new(index, vec![Column::new("x", values)]).unwrap()
}

proptest! {
    #[test]
    fn counts_and_missing_share_add_up(values in prop::collection::vec(arb_value(), 0..80)) {
        let rows = values.len();
        let missing = values.iter().filter(|v| v.is_none()).count();
        let table = summarize(&frame_from(values));
        let s = table.get("x").unwrap();

        prop_assert_eq!(s.count + missing, rows);
        match s.missing_pct {
            Some(pct) => {
                prop_assert!(rows > 0);
                prop_assert!((0.0..=100.0).contains(&pct), "missing_pct {}", pct);
                prop_assert!((pct - missing as f64 / rows as f64 * 100.0).abs() < 1e-9);
            }
            None => prop_assert_eq!(rows, 0),
        }
    }

    #[test]
    fn quartiles_are_ordered(values in prop::collection::vec(arb_value(), 1..80)) {
        let table = summarize(&frame_from(values));
        let s = table.get("x").unwrap();

        if s.count == 0 {
            prop_assert!(s.min.is_none() && s.median.is_none() && s.max.is_none());
        } else {
            let (min, q25, q50, q75, max) = (
                s.min.unwrap(),
                s.q25.unwrap(),
                s.median.unwrap(),
                s.q75.unwrap(),
                s.max.unwrap(),
            );
            prop_assert!(min <= q25 && q25 <= q50 && q50 <= q75 && q75 <= max);
        }
    }

    #[test]
    fn valid_dates_follow_count(values in prop::collection::vec(arb_value(), 0..80)) {
        let table = summarize(&frame_from(values));
        let s = table.get("x").unwrap();

        prop_assert_eq!(s.start_date.is_some(), s.count > 0);
        prop_assert_eq!(s.end_date.is_some(), s.count > 0);
        if let (Some(first), Some(last)) = (s.start_date, s.end_date) {
            prop_assert!(first <= last);
        }
    }
}
