//! Calendar resampling.
//!
//! Series recorded at different native frequencies (daily market closes,
//! monthly macro releases) only share a handful of rows after an outer join.
//! Averaging each column within calendar months puts them on a common grid.

use crate::domain::{Column, FrameError, TimeFrame};
use chrono::{Datelike, NaiveDate};

/// Resample to calendar months by averaging the present values in each month.
///
/// The output index holds the month-end date of every month from the first
/// to the last month of the input index, including months with no rows;
/// months without any present value hold `None`.
pub fn resample_monthly_mean(frame: &TimeFrame) -> Result<TimeFrame, FrameError> {
    let Some((first, last)) = frame.date_range() else {
        let columns = frame
            .columns()
            .iter()
            .map(|c| Column::new(c.label.clone(), Vec::new()))
            .collect();
        return TimeFrame::new(Vec::new(), columns);
    };

    let n_months = month_offset(first, last) + 1;
    let index: Vec<NaiveDate> = (0..n_months)
        .map(|offset| month_end(first, offset))
        .collect();

    let columns = frame
        .columns()
        .iter()
        .map(|col| {
            let mut sums = vec![0.0; n_months];
            let mut counts = vec![0usize; n_months];
            for (date, value) in frame.index().iter().zip(&col.values) {
                if let Some(v) = value {
                    let bucket = month_offset(first, *date);
                    sums[bucket] += v;
                    counts[bucket] += 1;
                }
            }
            let values = sums
                .into_iter()
                .zip(counts)
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect();
            Column::new(col.label.clone(), values)
        })
        .collect();

    TimeFrame::new(index, columns)
}

/// Whole months from `origin`'s month to `date`'s month.
fn month_offset(origin: NaiveDate, date: NaiveDate) -> usize {
    let months = (date.year() - origin.year()) * 12 + date.month() as i32 - origin.month() as i32;
    months.max(0) as usize
}

/// Last day of the month `offset` months after `origin`'s month.
fn month_end(origin: NaiveDate, offset: usize) -> NaiveDate {
    let total = origin.year() * 12 + origin.month0() as i32 + offset as i32 + 1;
    let (year, month0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .expect("month arithmetic stays within chrono's date range")
}
