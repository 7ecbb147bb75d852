//! Moving averages, truncation, and normalization by population.

use crate::domain::{LabeledSeries, Observation, missing_if_nan};
use crate::error::AppError;
use crate::window::window_equalize;

/// Which population series to divide by in per-capita conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulationBasis {
    /// Civilian noninstitutional population, 16 years and over (`CNP16OV`).
    #[default]
    Civilian16Plus,
    /// Total population (`POP`).
    Total,
}

impl PopulationBasis {
    pub fn series_id(self) -> &'static str {
        match self {
            PopulationBasis::Civilian16Plus => "CNP16OV",
            PopulationBasis::Total => "POP",
        }
    }
}

impl LabeledSeries {
    /// Rolling mean over `length` observations.
    ///
    /// One-sided (trailing) unless `center`; windows that are incomplete or
    /// contain a missing value are dropped. For an even `length` the centered
    /// window reaches one observation further back than forward.
    pub fn ma(&self, length: usize, center: bool) -> Result<LabeledSeries, AppError> {
        if length == 0 {
            return Err(AppError::invalid("moving average length must be at least 1"));
        }
        let n = self.len();
        let offset = if center { (length - 1) / 2 } else { 0 };
        let mut data = Vec::new();
        if n >= length {
            for end in (length - 1)..n {
                let window = &self.data[end + 1 - length..=end];
                let sum: Option<f64> = window.iter().map(|(_, v)| *v).sum();
                if let Some(sum) = sum {
                    data.push((self.data[end - offset].0, Some(sum / length as f64)));
                }
            }
        }

        let mut out = self.derive(data);
        out.title = if center {
            format!("{} (: two-sided moving average)", self.title)
        } else {
            format!("{} (: one-sided moving average)", self.title)
        };
        Ok(out)
    }

    /// The most recent `n` observations (all of them if fewer).
    pub fn recent(&self, n: usize) -> LabeledSeries {
        let start = self.len().saturating_sub(n);
        self.derive(self.data[start..].to_vec())
    }

    /// Remove missing observations, leaving gaps in the date index.
    pub fn drop_missing(&self) -> LabeledSeries {
        let data: Vec<Observation> = self.data.iter().filter(|(_, v)| v.is_some()).copied().collect();
        self.derive(data)
    }

    /// Divide by `population` over the common window of the two series.
    ///
    /// `population` should already be at this series' frequency; dates without
    /// a matching population value become missing.
    pub fn per_capita_with(&self, population: &LabeledSeries) -> LabeledSeries {
        let equalized = window_equalize(&[self.clone(), population.clone()]);
        let (series, population) = (&equalized[0], &equalized[1]);

        let data = series
            .data
            .iter()
            .map(|&(d, v)| {
                let ratio = match (v, population.value_at(d)) {
                    (Some(x), Some(p)) => missing_if_nan(x / p),
                    _ => None,
                };
                (d, ratio)
            })
            .collect();

        let mut out = series.derive(data);
        out.title = format!("{} Per Capita", self.title);
        out.units = format!("{} Per Thousand People", self.units);
        out.units_short = format!("{} Per Thousand People", self.units_short);
        out
    }
}
