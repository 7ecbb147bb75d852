//! Christiano-Fitzgerald asymmetric band-pass filter (random-walk, no drift).
//!
//! Each interior observation gets its own asymmetric set of weights spanning
//! the full sample, with the end-point weights chosen so the weights sum to
//! zero. No observations are lost; the cycle is zero at both end points.

use std::f64::consts::PI;

use crate::domain::{Frequency, LabeledSeries};
use crate::error::AppError;
use crate::filters::{Decomposition, observations};

/// Recommended `(low, high)` by frequency.
pub fn cf_defaults(freq: Option<Frequency>) -> Option<(f64, f64)> {
    match freq? {
        Frequency::Monthly => Some((18.0, 96.0)),
        Frequency::Quarterly => Some((6.0, 32.0)),
        Frequency::Annual => Some((2.0, 8.0)),
        _ => None,
    }
}

/// Cycle component of `x` for periods between `low` and `high`.
pub fn cf_cycle(x: &[f64], low: f64, high: f64) -> Vec<f64> {
    let n = x.len();
    let mut y = vec![0.0; n];
    if n < 3 {
        return y;
    }

    let a = 2.0 * PI / high;
    let b = 2.0 * PI / low;
    // Ideal band-pass weights B_0 .. B_{n-1}.
    let mut bw = Vec::with_capacity(n);
    bw.push((b - a) / PI);
    for j in 1..n {
        let jf = j as f64;
        bw.push(((b * jf).sin() - (a * jf).sin()) / (PI * jf));
    }

    // prefix[m] = B_1 + ... + B_m
    let mut prefix = vec![0.0; n];
    for m in 1..n {
        prefix[m] = prefix[m - 1] + bw[m];
    }

    for i in 1..n - 1 {
        let ahead = n - i - 2;
        let behind = i - 1;
        let coef_last = -0.5 * bw[0] - prefix[ahead];
        let coef_first = -bw[0] - prefix[ahead] - prefix[behind] - coef_last;

        let mut v = bw[0] * x[i];
        for k in 1..=ahead {
            v += bw[k] * x[i + k];
        }
        for k in 1..=behind {
            v += bw[k] * x[i - k];
        }
        v += coef_last * x[n - 1] + coef_first * x[0];
        y[i] = v;
    }
    y
}

impl LabeledSeries {
    /// Christiano-Fitzgerald filter keeping periods in `[low, high]`.
    ///
    /// With both parameters unset, the recommendation for the series frequency
    /// is used: `(18, 96)` monthly, `(6, 32)` quarterly, `(2, 8)` annual.
    pub fn cf_filter(&self, low: Option<f64>, high: Option<f64>) -> Result<Decomposition, AppError> {
        let (low, high) = match (low, high) {
            (None, None) => cf_defaults(self.frequency_kind()).ok_or_else(|| {
                AppError::invalid(format!(
                    "cf_filter: no default parameters for frequency '{}'; supply low and high",
                    self.frequency_short
                ))
            })?,
            (Some(low), Some(high)) => (low, high),
            _ => return Err(AppError::invalid("cf_filter: supply low and high together")),
        };
        if !(low.is_finite() && high.is_finite() && low >= 2.0 && high > low) {
            return Err(AppError::invalid(format!(
                "cf_filter: need 2 <= low < high, got low={low}, high={high}"
            )));
        }

        let x = self.complete_values("cf_filter")?;
        let cycle = cf_cycle(&x, low, high);
        let trend: Vec<f64> = x.iter().zip(&cycle).map(|(v, c)| v - c).collect();
        let dates = self.dates();

        Ok(Decomposition::labeled(
            self,
            "CF filtered",
            observations(&dates, &cycle),
            observations(&dates, &trend),
        ))
    }
}
