//! Logs and percentage changes.
//!
//! Percentage changes are computed over a lag measured in observations: one
//! period for `pc`, `t` periods (one year) for `apc`. Edge observations made
//! missing by the lag are dropped.

use crate::domain::{LabeledSeries, Observation, missing_if_nan};
use crate::error::AppError;

impl LabeledSeries {
    /// Natural log of every observation.
    pub fn log(&self) -> LabeledSeries {
        let data = self
            .data
            .iter()
            .map(|&(d, v)| (d, v.and_then(|x| missing_if_nan(x.ln()))))
            .collect();
        let mut out = self.derive(data);
        out.units = format!("Log {}", self.units);
        out.units_short = format!("Log {}", self.units_short);
        out.title = format!("Log {}", self.title);
        out
    }

    /// Percentage change over one year (`t` observations).
    ///
    /// `log` selects `100·ln(ratio)` over `100·(ratio − 1)`; `backward` compares
    /// with the previous year rather than the next one.
    pub fn apc(&self, log: bool, backward: bool) -> Result<LabeledSeries, AppError> {
        let lag = self.year_lag("apc")?;
        let data = percent_change(&self.data, lag, backward, |ratio| {
            if log { 100.0 * ratio.ln() } else { 100.0 * (ratio - 1.0) }
        });
        let mut out = self.derive(data);
        out.units = "Percent".to_string();
        out.units_short = "%".to_string();
        out.title = format!("Annual Percentage Change in {}", self.title);
        Ok(out)
    }

    /// Percentage change from the preceding (or, with `backward = false`, to the next) period.
    ///
    /// With `annualized`, the log rate is multiplied by `t` and the gross ratio
    /// raised to the power `t`.
    pub fn pc(&self, log: bool, backward: bool, annualized: bool) -> Result<LabeledSeries, AppError> {
        let t = if annualized { self.year_lag("annualized pc")? as f64 } else { 1.0 };
        let data = percent_change(&self.data, 1, backward, |ratio| {
            if log { 100.0 * t * ratio.ln() } else { 100.0 * (ratio.powf(t) - 1.0) }
        });
        let mut out = self.derive(data);
        out.units = "Percent".to_string();
        out.units_short = "%".to_string();
        out.title = format!("Percentage Change in {}", self.title);
        Ok(out)
    }

    fn year_lag(&self, operation: &str) -> Result<usize, AppError> {
        match self.t {
            Some(t) if t > 0 => Ok(t as usize),
            _ => Err(AppError::invalid(format!(
                "{operation}: observations per year unknown for frequency '{}'",
                self.frequency_short
            ))),
        }
    }
}

fn percent_change(
    data: &[Observation],
    lag: usize,
    backward: bool,
    f: impl Fn(f64) -> f64,
) -> Vec<Observation> {
    let n = data.len();
    if lag >= n {
        return Vec::new();
    }
    (0..n - lag)
        .filter_map(|i| {
            let (date, num, den) = if backward {
                (data[i + lag].0, data[i + lag].1, data[i].1)
            } else {
                (data[i].0, data[i + lag].1, data[i].1)
            };
            let value = missing_if_nan(f(num? / den?))?;
            Some((date, Some(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::RawMetadata;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn monthly(values: &[f64]) -> LabeledSeries {
        let dates: Vec<NaiveDate> = (0..values.len())
            .map(|i| d(2020 + (i / 12) as i32, (i % 12) as u32 + 1, 1))
            .collect();
        let meta = RawMetadata {
            title: "Index".to_string(),
            units: "Index 2020=100".to_string(),
            frequency_short: "M".to_string(),
            ..Default::default()
        };
        LabeledSeries::from_raw(values, &dates, meta).unwrap()
    }

    #[test]
    fn pc_on_constant_growth() {
        let a = monthly(&[100.0, 110.0, 121.0]);
        let pc = a.pc(false, true, false).unwrap();
        assert_eq!(pc.dates(), vec![d(2020, 2, 1), d(2020, 3, 1)]);
        for v in pc.values() {
            assert!((v.unwrap() - 10.0).abs() < 1e-9);
        }
        assert_eq!(pc.units, "Percent");
        assert_eq!(pc.title, "Percentage Change in Index");
    }

    #[test]
    fn pc_forward_labels_start_of_interval() {
        let a = monthly(&[100.0, 110.0, 121.0]);
        let pc = a.pc(false, false, false).unwrap();
        assert_eq!(pc.dates(), vec![d(2020, 1, 1), d(2020, 2, 1)]);
    }

    #[test]
    fn pc_annualized_log_scales_by_t() {
        let a = monthly(&[100.0, 101.0]);
        let pc = a.pc(true, true, true).unwrap();
        let expected = 100.0 * 12.0 * (1.01_f64).ln();
        assert!((pc.values()[0].unwrap() - expected).abs() < 1e-9);

        let compounded = a.pc(false, true, true).unwrap();
        let expected = 100.0 * (1.01_f64.powi(12) - 1.0);
        assert!((compounded.values()[0].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn apc_uses_twelve_month_lag() {
        let values: Vec<f64> = (0..14).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let apc = monthly(&values).apc(false, true).unwrap();
        assert_eq!(apc.len(), 2);
        assert_eq!(apc.first_date(), Some(d(2021, 1, 1)));
        let expected = 100.0 * (1.01_f64.powi(12) - 1.0);
        assert!((apc.values()[0].unwrap() - expected).abs() < 1e-9);
        assert_eq!(apc.title, "Annual Percentage Change in Index");
    }

    #[test]
    fn apc_requires_known_frequency() {
        let dates = [d(2020, 1, 1), d(2020, 1, 15)];
        let s = LabeledSeries::from_raw(&[1.0, 2.0], &dates, RawMetadata::default()).unwrap();
        assert!(matches!(s.apc(false, true), Err(AppError::InvalidParameter(_))));
    }

    #[test]
    fn pc_skips_missing_neighbours() {
        let a = monthly(&[100.0, f64::NAN, 121.0, 133.1]);
        let pc = a.pc(false, true, false).unwrap();
        assert_eq!(pc.dates(), vec![d(2020, 4, 1)]);
    }

    #[test]
    fn log_prefixes_labels_and_keeps_input() {
        let a = monthly(&[1.0, std::f64::consts::E]);
        let before = a.clone();
        let l = a.log();
        assert_eq!(a, before);
        assert_eq!(l.units, "Log Index 2020=100");
        assert!((l.values()[1].unwrap() - 1.0).abs() < 1e-12);
    }
}
