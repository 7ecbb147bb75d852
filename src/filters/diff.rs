//! First-difference filter.

use crate::domain::LabeledSeries;
use crate::error::AppError;
use crate::filters::{Decomposition, observations};

impl LabeledSeries {
    /// Trend = previous observation, cycle = demeaned first difference.
    ///
    /// The first observation is lost.
    pub fn diff_filter(&self) -> Result<Decomposition, AppError> {
        let y = self.complete_values("diff_filter")?;
        if y.len() < 2 {
            return Ok(Decomposition::labeled(self, "first difference filtered", Vec::new(), Vec::new()));
        }

        let all_dates = self.dates();
        let dates = &all_dates[1..];
        let diffs: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
        let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
        let cycle: Vec<f64> = diffs.iter().map(|d| d - mean).collect();
        let trend = &y[..y.len() - 1];

        Ok(Decomposition::labeled(
            self,
            "first difference filtered",
            observations(dates, &cycle),
            observations(dates, trend),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::RawMetadata;

    fn quarterly(values: &[f64]) -> LabeledSeries {
        let dates: Vec<NaiveDate> = (0..values.len())
            .map(|i| NaiveDate::from_ymd_opt(2000 + (i / 4) as i32, (i % 4) as u32 * 3 + 1, 1).unwrap())
            .collect();
        let meta = RawMetadata { frequency_short: "Q".to_string(), ..Default::default() };
        LabeledSeries::from_raw(values, &dates, meta).unwrap()
    }

    #[test]
    fn loses_first_observation_and_demeans() {
        let s = quarterly(&[1.0, 2.0, 4.0, 7.0]);
        let out = s.diff_filter().unwrap();
        assert_eq!(out.cycle.len(), 3);
        assert_eq!(out.cycle.first_date(), s.dates().get(1).copied());
        // diffs 1, 2, 3 with mean 2
        assert_eq!(out.cycle.values(), vec![Some(-1.0), Some(0.0), Some(1.0)]);
        assert_eq!(out.trend.values(), vec![Some(1.0), Some(2.0), Some(4.0)]);
    }

    #[test]
    fn single_observation_gives_empty_components() {
        let out = quarterly(&[5.0]).diff_filter().unwrap();
        assert!(out.cycle.is_empty());
        assert_eq!(out.trend.date_range, "Range: Null");
    }
}
