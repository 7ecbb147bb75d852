//! Hodrick-Prescott filter, two-sided and recursive one-sided.
//!
//! - two-sided: the trend minimizes `Σ(y - τ)² + λ Σ(Δ²τ)²` over the whole sample
//! - one-sided: each prefix of length 3 or more is smoothed on its own and only
//!   the last trend value is kept, so the trend at `t` uses data up to `t` only
//!
//! The one-sided variant re-solves every prefix (quadratic in the sample
//! length). Prefixes are independent and are solved in parallel.

use rayon::prelude::*;

use crate::domain::{Frequency, LabeledSeries};
use crate::error::AppError;
use crate::filters::{Decomposition, observations};
use crate::math::Pentadiagonal;

/// Recommended smoothing parameter by frequency.
pub fn hp_defaults(freq: Option<Frequency>) -> Option<f64> {
    match freq? {
        Frequency::Daily => Some(104_976_000_000.0),
        Frequency::Monthly => Some(129_600.0),
        Frequency::Quarterly => Some(1_600.0),
        Frequency::Annual => Some(6.25),
        _ => None,
    }
}

/// Two-sided HP trend of `y`.
pub fn hp_trend(y: &[f64], lambda: f64) -> Option<Vec<f64>> {
    Pentadiagonal::hp_system(y.len(), lambda).solve(y)
}

/// One-sided HP trend: `trend[t]` is the last value of the two-sided trend
/// over `y[..=t]`. The first two observations are their own trend.
pub fn hp_trend_one_sided(y: &[f64], lambda: f64) -> Option<Vec<f64>> {
    let n = y.len();
    let head = n.min(2);
    let tail: Option<Vec<f64>> = (3..=n)
        .into_par_iter()
        .map(|len| hp_trend(&y[..len], lambda).and_then(|t| t.last().copied()))
        .collect();

    let mut trend = y[..head].to_vec();
    trend.extend(tail?);
    Some(trend)
}

impl LabeledSeries {
    /// HP filter with smoothing parameter `lambda`.
    ///
    /// Unset `lambda` uses the frequency recommendation: 104,976,000,000 daily,
    /// 129,600 monthly, 1,600 quarterly, 6.25 annual.
    pub fn hp_filter(&self, lambda: Option<f64>, two_sided: bool) -> Result<Decomposition, AppError> {
        let lambda = match lambda {
            Some(l) => l,
            None => hp_defaults(self.frequency_kind()).ok_or_else(|| {
                AppError::invalid(format!(
                    "hp_filter: no default lambda for frequency '{}'; supply lambda",
                    self.frequency_short
                ))
            })?,
        };
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(AppError::invalid(format!("hp_filter: lambda must be >= 0, got {lambda}")));
        }

        let y = self.complete_values("hp_filter")?;
        let trend = if two_sided {
            hp_trend(&y, lambda)
        } else {
            hp_trend_one_sided(&y, lambda)
        }
        .ok_or_else(|| AppError::invalid("hp_filter: smoothing system could not be solved"))?;
        let cycle: Vec<f64> = y.iter().zip(&trend).map(|(v, t)| v - t).collect();

        log::debug!(
            "hp_filter {}: n={} lambda={lambda} two_sided={two_sided}",
            self.series_id,
            y.len()
        );

        let dates = self.dates();
        Ok(Decomposition::labeled(
            self,
            "HP filtered",
            observations(&dates, &cycle),
            observations(&dates, &trend),
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
            .map(|i| NaiveDate::from_ymd_opt(1980 + (i / 4) as i32, (i % 4) as u32 * 3 + 1, 1).unwrap())
            .collect();
        let meta = RawMetadata {
            title: "Output".to_string(),
            frequency_short: "Q".to_string(),
            ..Default::default()
        };
        LabeledSeries::from_raw(values, &dates, meta).unwrap()
    }

    fn wiggly(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + 0.4 * i as f64 + 2.0 * (i as f64 * 0.9).sin()).collect()
    }

    #[test]
    fn defaults_by_frequency() {
        assert_eq!(hp_defaults(Some(Frequency::Quarterly)), Some(1600.0));
        assert_eq!(hp_defaults(Some(Frequency::Monthly)), Some(129_600.0));
        assert_eq!(hp_defaults(Some(Frequency::Annual)), Some(6.25));
        assert_eq!(hp_defaults(Some(Frequency::Weekly)), None);
        assert_eq!(hp_defaults(None), None);
    }

    #[test]
    fn two_sided_keeps_length_and_sums_to_data() {
        let values = wiggly(40);
        let out = quarterly(&values).hp_filter(None, true).unwrap();
        assert_eq!(out.cycle.len(), 40);
        assert_eq!(out.trend.len(), 40);
        for i in 0..40 {
            let sum = out.cycle.values()[i].unwrap() + out.trend.values()[i].unwrap();
            assert!((sum - values[i]).abs() < 1e-8);
        }
        assert_eq!(out.trend.title, "Output - trend (HP filtered)");
    }

    #[test]
    fn linear_data_is_its_own_trend() {
        let values: Vec<f64> = (0..25).map(|i| 2.0 + 0.3 * i as f64).collect();
        let trend = hp_trend(&values, 1600.0).unwrap();
        for (t, v) in trend.iter().zip(&values) {
            assert!((t - v).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_lambda_reproduces_data() {
        let values = wiggly(10);
        let trend = hp_trend(&values, 0.0).unwrap();
        for (t, v) in trend.iter().zip(&values) {
            assert!((t - v).abs() < 1e-12);
        }
    }

    #[test]
    fn one_sided_ends_where_two_sided_ends() {
        let values = wiggly(30);
        let two = hp_trend(&values, 1600.0).unwrap();
        let one = hp_trend_one_sided(&values, 1600.0).unwrap();
        assert_eq!(one.len(), 30);
        assert!((one[29] - two[29]).abs() < 1e-9);
        assert_eq!(&one[..2], &values[..2]);
    }

    #[test]
    fn one_sided_is_causal() {
        let mut values = wiggly(20);
        let before = hp_trend_one_sided(&values, 1600.0).unwrap();
        values[19] += 50.0;
        let after = hp_trend_one_sided(&values, 1600.0).unwrap();
        assert_eq!(&before[..19], &after[..19]);
        assert!((before[19] - after[19]).abs() > 1e-6);
    }

    #[test]
    fn one_sided_filter_keeps_length() {
        let out = quarterly(&wiggly(16)).hp_filter(Some(1600.0), false).unwrap();
        assert_eq!(out.cycle.len(), 16);
        assert_eq!(out.cycle.values()[0], Some(0.0));
    }

    #[test]
    fn rejects_negative_lambda() {
        let s = quarterly(&wiggly(8));
        assert!(matches!(s.hp_filter(Some(-1.0), true), Err(AppError::InvalidParameter(_))));
    }
}
