//! Offline synthetic series generation.
//!
//! `SyntheticSource` answers any series id with a seeded log random walk, so
//! the whole pipeline can run without an API key. The same id, vintage and
//! seed always produce the same record.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration, Months, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::DataSource;
use crate::domain::{Frequency, Observation, RawSeriesRecord};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub frequency: Frequency,
    pub start: NaiveDate,
    pub periods: usize,
    pub seed: u64,
    /// Level of the first observation.
    pub level: f64,
    /// Mean log growth per year.
    pub drift: f64,
    /// Standard deviation of log growth per year.
    pub volatility: f64,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            frequency: Frequency::Quarterly,
            start: NaiveDate::from_ymd_opt(1960, 1, 1).unwrap_or_default(),
            periods: 240,
            seed: 42,
            level: 100.0,
            drift: 0.02,
            volatility: 0.03,
        }
    }
}

impl SyntheticSource {
    pub fn new(frequency: Frequency, start: NaiveDate, periods: usize) -> Self {
        Self {
            frequency,
            start,
            periods,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Observation dates, stopping early at the calendar limit.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut out = Vec::with_capacity(self.periods);
        let mut date = Some(self.start);
        while let Some(d) = date {
            if out.len() == self.periods {
                break;
            }
            out.push(d);
            date = step(self.frequency, d);
        }
        out
    }

    fn generate(&self, series_id: &str, as_of: NaiveDate) -> Result<Vec<Observation>, AppError> {
        if !(self.level.is_finite() && self.level > 0.0) {
            return Err(AppError::invalid("synthetic level must be > 0"));
        }
        let per_year = f64::from(self.frequency.obs_per_year());
        let step_sd = self.volatility / per_year.sqrt();
        let normal = Normal::new(self.drift / per_year, step_sd)
            .map_err(|e| AppError::invalid(format!("Noise distribution error: {e}")))?;
        let mut rng = StdRng::seed_from_u64(series_seed(series_id, self.seed));

        let mut log_level = self.level.ln();
        let mut data = Vec::with_capacity(self.periods);
        for (i, date) in self.dates().into_iter().enumerate() {
            if date > as_of {
                break;
            }
            if i > 0 {
                log_level += normal.sample(&mut rng);
            }
            data.push((date, Some(log_level.exp())));
        }
        Ok(data)
    }
}

impl DataSource for SyntheticSource {
    fn fetch_series(&self, series_id: &str, as_of: NaiveDate) -> Result<RawSeriesRecord, AppError> {
        let observations = self.generate(series_id, as_of)?;
        Ok(RawSeriesRecord {
            title: format!("Synthetic {series_id}"),
            frequency: self.frequency.name().to_string(),
            frequency_short: self.frequency.short().to_string(),
            units: "Index".to_string(),
            units_short: "Index".to_string(),
            seasonal_adjustment: "Not Seasonally Adjusted".to_string(),
            seasonal_adjustment_short: "NSA".to_string(),
            last_updated: as_of.format("%Y-%m-%d").to_string(),
            notes: Some(format!("Log random walk, seed {}.", self.seed)),
            release: "Synthetic Data".to_string(),
            source: "fred-series offline generator".to_string(),
            observations,
        })
    }
}

fn step(freq: Frequency, date: NaiveDate) -> Option<NaiveDate> {
    match freq {
        Frequency::Daily => date.checked_add_signed(Duration::days(1)),
        Frequency::Weekly => date.checked_add_signed(Duration::days(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Quarterly => date.checked_add_months(Months::new(3)),
        Frequency::Semiannual => date.checked_add_months(Months::new(6)),
        Frequency::Annual => date.checked_add_months(Months::new(12)),
    }
}

fn series_seed(series_id: &str, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    series_id.hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}
