//! Calendar frequency conversion.
//!
//! Observations are grouped into calendar bins and each bin is reduced with a
//! `ResampleMethod`. Bins are labeled the way the FRED frequencies are dated:
//!
//! - `D`: the day itself
//! - `W`: the Sunday ending the week
//! - `M`, `Q`, `A`: the first day of the month, quarter, or year
//!
//! Every bin between the first and last observation is emitted; a bin with no
//! observed value is missing (or `0` for `sum`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use log::warn;

use crate::domain::{Frequency, LabeledSeries, Observation};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMethod {
    First,
    Last,
    Mean,
    Median,
    Min,
    Max,
    Sum,
}

impl ResampleMethod {
    pub fn name(self) -> &'static str {
        match self {
            ResampleMethod::First => "first",
            ResampleMethod::Last => "last",
            ResampleMethod::Mean => "mean",
            ResampleMethod::Median => "median",
            ResampleMethod::Min => "min",
            ResampleMethod::Max => "max",
            ResampleMethod::Sum => "sum",
        }
    }

    fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return match self {
                ResampleMethod::Sum => Some(0.0),
                _ => None,
            };
        }
        let n = values.len();
        Some(match self {
            ResampleMethod::First => values[0],
            ResampleMethod::Last => values[n - 1],
            ResampleMethod::Mean => values.iter().sum::<f64>() / n as f64,
            ResampleMethod::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                if n % 2 == 1 {
                    sorted[n / 2]
                } else {
                    0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
                }
            }
            ResampleMethod::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            ResampleMethod::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ResampleMethod::Sum => values.iter().sum(),
        })
    }
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(ResampleMethod::First),
            "last" => Ok(ResampleMethod::Last),
            "mean" => Ok(ResampleMethod::Mean),
            "median" => Ok(ResampleMethod::Median),
            "min" => Ok(ResampleMethod::Min),
            "max" => Ok(ResampleMethod::Max),
            "sum" => Ok(ResampleMethod::Sum),
            other => Err(AppError::invalid(format!(
                "unrecognized resampling method '{other}', expected first, last, mean, median, min, max or sum"
            ))),
        }
    }
}

/// Label of the calendar bin containing `date`.
pub fn bin_label(freq: Frequency, date: NaiveDate) -> Result<NaiveDate, AppError> {
    let label = match freq {
        Frequency::Daily => Some(date),
        Frequency::Weekly => {
            let ahead = (7 - date.weekday().num_days_from_sunday()) % 7;
            date.checked_add_signed(Duration::days(ahead as i64))
        }
        Frequency::Monthly => date.with_day(1),
        Frequency::Quarterly => NaiveDate::from_ymd_opt(date.year(), (date.month0() / 3) * 3 + 1, 1),
        Frequency::Annual => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        Frequency::Semiannual => return Err(unsupported_target(freq)),
    };
    label.ok_or_else(|| AppError::invalid(format!("date {date} out of range")))
}

fn next_label(freq: Frequency, label: NaiveDate) -> Option<NaiveDate> {
    match freq {
        Frequency::Daily => label.checked_add_signed(Duration::days(1)),
        Frequency::Weekly => label.checked_add_signed(Duration::days(7)),
        Frequency::Monthly => label.checked_add_months(Months::new(1)),
        Frequency::Quarterly => label.checked_add_months(Months::new(3)),
        Frequency::Annual => label.checked_add_months(Months::new(12)),
        Frequency::Semiannual => None,
    }
}

fn unsupported_target(freq: Frequency) -> AppError {
    AppError::invalid(format!("cannot resample to '{freq}': freq must be 'D', 'W', 'M', 'Q', or 'A'"))
}

impl LabeledSeries {
    /// Convert to another calendar frequency.
    ///
    /// Converting to a higher frequency is allowed but logged as a warning,
    /// since the result is mostly missing bins.
    pub fn as_frequency(&self, freq: Frequency, method: ResampleMethod) -> Result<LabeledSeries, AppError> {
        if freq == Frequency::Semiannual {
            return Err(unsupported_target(freq));
        }
        if let Some(current) = self.t {
            if current < freq.obs_per_year() {
                warn!(
                    "converting '{}' from t={current} to higher frequency {freq}; results may not behave as expected",
                    self.series_id
                );
            }
        }

        let data = resample(&self.data, freq, method)?;
        let mut out = self.derive(data);
        out.frequency = freq.name().to_string();
        out.frequency_short = freq.short().to_string();
        out.t = Some(freq.obs_per_year());
        Ok(out)
    }
}

fn resample(data: &[Observation], freq: Frequency, method: ResampleMethod) -> Result<Vec<Observation>, AppError> {
    let Some(&(last_date, _)) = data.last() else {
        return Ok(Vec::new());
    };
    let last_label = bin_label(freq, last_date)?;

    let mut out = Vec::new();
    let mut bucket: Vec<f64> = Vec::new();
    let mut idx = 0;
    let mut label = bin_label(freq, data[0].0)?;
    loop {
        bucket.clear();
        while idx < data.len() && bin_label(freq, data[idx].0)? == label {
            if let Some(v) = data[idx].1 {
                bucket.push(v);
            }
            idx += 1;
        }
        out.push((label, method.reduce(&bucket)));
        if label >= last_label {
            break;
        }
        label = match next_label(freq, label) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(out)
}
