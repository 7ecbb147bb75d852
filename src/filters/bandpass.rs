//! Baxter-King symmetric band-pass filter.
//!
//! The cycle is a symmetric moving average of the data with `2K + 1` weights
//! approximating the ideal band-pass filter for periods between `low` and
//! `high`. The weights are shifted to sum to zero so linear trends are
//! removed entirely. `K` observations are lost at each end.

use std::f64::consts::PI;

use crate::domain::{Frequency, LabeledSeries};
use crate::error::AppError;
use crate::filters::{Decomposition, observations};

/// Recommended `(low, high, K)` by frequency.
pub fn bp_defaults(freq: Option<Frequency>) -> Option<(f64, f64, usize)> {
    match freq? {
        Frequency::Monthly => Some((24.0, 84.0, 84)),
        Frequency::Quarterly => Some((6.0, 32.0, 12)),
        Frequency::Annual => Some((1.5, 8.0, 3)),
        _ => None,
    }
}

/// The `2K + 1` filter weights, lag `-K` first.
pub fn baxter_king_weights(low: f64, high: f64, k: usize) -> Vec<f64> {
    let omega_1 = 2.0 * PI / high;
    let omega_2 = 2.0 * PI / low;

    let mut weights = vec![0.0; 2 * k + 1];
    weights[k] = (omega_2 - omega_1) / PI;
    for j in 1..=k {
        let jf = j as f64;
        let w = ((omega_2 * jf).sin() - (omega_1 * jf).sin()) / (PI * jf);
        weights[k + j] = w;
        weights[k - j] = w;
    }

    let mean = weights.iter().sum::<f64>() / weights.len() as f64;
    for w in &mut weights {
        *w -= mean;
    }
    weights
}

impl LabeledSeries {
    /// Band-pass filter keeping fluctuations with periods in `[low, high]`.
    ///
    /// With all three parameters unset, the recommendation for the series
    /// frequency is used: `(24, 84, 84)` monthly, `(6, 32, 12)` quarterly,
    /// `(1.5, 8, 3)` annual.
    pub fn bp_filter(
        &self,
        low: Option<f64>,
        high: Option<f64>,
        k: Option<usize>,
    ) -> Result<Decomposition, AppError> {
        let (low, high, k) = match (low, high, k) {
            (None, None, None) => bp_defaults(self.frequency_kind()).ok_or_else(|| {
                AppError::invalid(format!(
                    "bp_filter: no default parameters for frequency '{}'; supply low, high and K",
                    self.frequency_short
                ))
            })?,
            (Some(low), Some(high), Some(k)) => (low, high, k),
            _ => return Err(AppError::invalid("bp_filter: supply low, high and K together")),
        };
        if k == 0 || !(low.is_finite() && high.is_finite() && low > 0.0 && high > low) {
            return Err(AppError::invalid(format!(
                "bp_filter: need 0 < low < high and K >= 1, got low={low}, high={high}, K={k}"
            )));
        }

        let x = self.complete_values("bp_filter")?;
        let method = "bandpass filtered";
        let n = x.len();
        if n < 2 * k + 1 {
            return Ok(Decomposition::labeled(self, method, Vec::new(), Vec::new()));
        }

        let weights = baxter_king_weights(low, high, k);
        let cycle: Vec<f64> = (k..n - k)
            .map(|t| weights.iter().zip(&x[t - k..=t + k]).map(|(w, v)| w * v).sum())
            .collect();
        let trend: Vec<f64> = x[k..n - k].iter().zip(&cycle).map(|(v, c)| v - c).collect();
        let dates = self.dates();
        let dates = &dates[k..n - k];

        Ok(Decomposition::labeled(
            self,
            method,
            observations(dates, &cycle),
            observations(dates, &trend),
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
            .map(|i| NaiveDate::from_ymd_opt(1960 + (i / 4) as i32, (i % 4) as u32 * 3 + 1, 1).unwrap())
            .collect();
        let meta = RawMetadata {
            title: "Real GDP".to_string(),
            frequency_short: "Q".to_string(),
            ..Default::default()
        };
        LabeledSeries::from_raw(values, &dates, meta).unwrap()
    }

    #[test]
    fn weights_are_symmetric_and_sum_to_zero() {
        let w = baxter_king_weights(6.0, 32.0, 12);
        assert_eq!(w.len(), 25);
        assert!(w.iter().sum::<f64>().abs() < 1e-12);
        for j in 0..12 {
            assert!((w[j] - w[24 - j]).abs() < 1e-15);
        }
    }

    #[test]
    fn output_loses_k_observations_each_end() {
        let values: Vec<f64> = (0..60).map(|i| (i as f64 * 0.7).sin() + 0.05 * i as f64).collect();
        let s = quarterly(&values);
        let out = s.bp_filter(None, None, None).unwrap();
        assert_eq!(out.cycle.len(), 60 - 2 * 12);
        assert_eq!(out.trend.len(), 60 - 2 * 12);
        assert_eq!(out.cycle.first_date(), Some(s.dates()[12]));
        assert_eq!(out.cycle.title, "Real GDP - deviation relative to trend (bandpass filtered)");
    }

    #[test]
    fn linear_trend_has_no_cycle() {
        let values: Vec<f64> = (0..40).map(|i| 3.0 + 0.5 * i as f64).collect();
        let out = quarterly(&values).bp_filter(Some(6.0), Some(32.0), Some(4)).unwrap();
        assert_eq!(out.cycle.len(), 32);
        for v in out.cycle.values() {
            assert!(v.unwrap().abs() < 1e-9);
        }
    }

    #[test]
    fn too_short_series_is_empty_not_error() {
        let out = quarterly(&[1.0, 2.0, 3.0]).bp_filter(Some(6.0), Some(32.0), Some(2)).unwrap();
        assert!(out.cycle.is_empty());
        assert_eq!(out.cycle.date_range, "Range: Null");
    }

    #[test]
    fn partial_parameters_are_rejected() {
        let s = quarterly(&[1.0; 30]);
        assert!(s.bp_filter(Some(6.0), None, None).is_err());
        assert!(s.bp_filter(Some(6.0), Some(32.0), Some(0)).is_err());

        let dates: Vec<NaiveDate> = (1..=5).map(|d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap()).collect();
        let daily = LabeledSeries::from_raw(&[1.0; 5], &dates, RawMetadata::default()).unwrap();
        assert!(matches!(daily.bp_filter(None, None, None), Err(AppError::InvalidParameter(_))));
    }
}
