//! Date-window restriction shared by all multi-series operations.
//!
//! An empty result is not an error: the series simply holds no observations
//! and its date-range label reads `Range: Null`.

use chrono::NaiveDate;

use crate::domain::LabeledSeries;

impl LabeledSeries {
    /// Restrict the data to the closed interval `[start, end]`.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> LabeledSeries {
        let data = self
            .data
            .iter()
            .filter(|(d, _)| *d >= start && *d <= end)
            .copied()
            .collect();
        self.derive(data)
    }
}

/// Common window of a list of series: latest first date to earliest last date.
///
/// `None` when the list is empty or any member has no observations.
pub fn common_window(series: &[LabeledSeries]) -> Option<(NaiveDate, NaiveDate)> {
    let start = series.iter().map(|s| s.first_date()).collect::<Option<Vec<_>>>()?.into_iter().max()?;
    let end = series.iter().map(|s| s.last_date()).collect::<Option<Vec<_>>>()?.into_iter().min()?;
    Some((start, end))
}

/// Restrict every series to the common window of the list.
///
/// When the windows do not overlap (or a member is empty) every output is an
/// empty series rather than an error.
pub fn window_equalize(series: &[LabeledSeries]) -> Vec<LabeledSeries> {
    match common_window(series) {
        Some((start, end)) => series.iter().map(|s| s.window(start, end)).collect(),
        None => series.iter().map(|s| s.derive(Vec::new())).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NULL_RANGE, RawMetadata};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series_a() -> LabeledSeries {
        let dates = [d(2020, 1, 1), d(2020, 2, 1), d(2020, 3, 1)];
        let meta = RawMetadata { frequency_short: "M".to_string(), ..Default::default() };
        LabeledSeries::from_raw(&[100.0, 110.0, 121.0], &dates, meta).unwrap()
    }

    #[test]
    fn single_day_window() {
        let w = series_a().window(d(2020, 2, 1), d(2020, 2, 1));
        assert_eq!(w.data, vec![(d(2020, 2, 1), Some(110.0))]);
        assert_eq!(w.date_range, "Range: 2020-02-01 to 2020-02-01");
    }

    #[test]
    fn non_overlapping_window_is_empty_not_error() {
        let w = series_a().window(d(2025, 1, 1), d(2025, 2, 1));
        assert!(w.is_empty());
        assert_eq!(w.date_range, NULL_RANGE);
        assert_eq!(w.t, Some(12));
    }

    #[test]
    fn equalize_intersects_and_is_idempotent() {
        let a = series_a();
        let dates = [d(2020, 2, 1), d(2020, 3, 1), d(2020, 4, 1)];
        let b = LabeledSeries::from_raw(&[1.0, 2.0, 3.0], &dates, RawMetadata::default()).unwrap();

        let once = window_equalize(&[a.clone(), b.clone()]);
        assert_eq!(once[0].dates(), vec![d(2020, 2, 1), d(2020, 3, 1)]);
        assert_eq!(once[1].dates(), once[0].dates());

        let twice = window_equalize(&once);
        assert_eq!(once, twice);
        assert_eq!(a, series_a());
    }

    #[test]
    fn equalize_disjoint_yields_empty_series() {
        let a = series_a();
        let b = a.window(d(2020, 3, 1), d(2020, 3, 1));
        let c = a.window(d(2020, 1, 1), d(2020, 1, 1));
        let out = window_equalize(&[b, c]);
        assert!(out.iter().all(|s| s.is_empty() && s.date_range == NULL_RANGE));
        assert!(window_equalize(&[]).is_empty());
    }
}
