//! The labeled time series value object.
//!
//! A `LabeledSeries` is a date-indexed sequence of optional values plus the
//! descriptive metadata FRED attaches to a series. Transformations never
//! mutate their input: they clone it and replace the data (see `derive`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Frequency, Observation, RawMetadata, RawSeriesRecord};
use crate::error::AppError;

/// Label used when a series holds no observations.
pub const NULL_RANGE: &str = "Range: Null";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    /// Observations with strictly increasing dates.
    pub data: Vec<Observation>,
    pub series_id: String,
    pub title: String,
    pub units: String,
    pub units_short: String,
    pub source: String,
    pub release: String,
    pub last_updated: String,
    pub notes: String,
    pub seasonal_adjustment: String,
    pub seasonal_adjustment_short: String,
    /// Vintage (as-of) date, `YYYY-MM-DD`.
    pub observation_date: String,
    pub frequency: String,
    pub frequency_short: String,
    /// Observations per year. `None` when the frequency is not in the fixed table.
    pub t: Option<u32>,
    pub date_range: String,
}

impl Default for LabeledSeries {
    /// The canonical empty series: no data, empty strings, `t = 0`.
    fn default() -> Self {
        Self {
            data: Vec::new(),
            series_id: String::new(),
            title: String::new(),
            units: String::new(),
            units_short: String::new(),
            source: String::new(),
            release: String::new(),
            last_updated: String::new(),
            notes: String::new(),
            seasonal_adjustment: String::new(),
            seasonal_adjustment_short: String::new(),
            observation_date: String::new(),
            frequency: String::new(),
            frequency_short: String::new(),
            t: Some(0),
            date_range: String::new(),
        }
    }
}

impl LabeledSeries {
    /// Assemble a series from a `DataSource` record fetched at `as_of`.
    pub fn from_record(
        series_id: &str,
        as_of: NaiveDate,
        record: RawSeriesRecord,
    ) -> Result<Self, AppError> {
        if series_id.trim().is_empty() {
            return Err(AppError::upstream("empty series id"));
        }
        let mut data = record.observations;
        data.sort_by_key(|(d, _)| *d);
        if let Some(w) = data.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(AppError::upstream(format!(
                "duplicate observation date {} for series {series_id}",
                w[0].0
            )));
        }

        let t = Frequency::from_short(&record.frequency_short).map(Frequency::obs_per_year);
        let date_range = date_range_label(&data);

        Ok(Self {
            data,
            series_id: series_id.to_string(),
            title: record.title,
            units: record.units,
            units_short: record.units_short,
            source: record.source,
            release: record.release,
            last_updated: record.last_updated,
            notes: record.notes.unwrap_or_default(),
            seasonal_adjustment: record.seasonal_adjustment,
            seasonal_adjustment_short: record.seasonal_adjustment_short,
            observation_date: as_of.format("%Y-%m-%d").to_string(),
            frequency: record.frequency,
            frequency_short: record.frequency_short,
            t,
            date_range,
        })
    }

    /// Build a series directly from caller-supplied arrays, bypassing any data source.
    ///
    /// NaN values are stored as missing observations. Dates must be strictly increasing.
    pub fn from_raw(values: &[f64], dates: &[NaiveDate], meta: RawMetadata) -> Result<Self, AppError> {
        if values.len() != dates.len() {
            return Err(AppError::invalid(format!(
                "{} values but {} dates",
                values.len(),
                dates.len()
            )));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AppError::invalid("dates must be strictly increasing"));
        }

        let data: Vec<Observation> = dates
            .iter()
            .zip(values)
            .map(|(&d, &v)| (d, missing_if_nan(v)))
            .collect();

        let known = Frequency::from_name(&meta.frequency).or_else(|| Frequency::from_short(&meta.frequency_short));
        let (frequency, frequency_short, t) = match known {
            Some(freq) => (freq.name().to_string(), freq.short().to_string(), Some(freq.obs_per_year())),
            None => (meta.frequency, meta.frequency_short, meta.t),
        };
        let date_range = date_range_label(&data);

        Ok(Self {
            data,
            series_id: meta.series_id,
            title: meta.title,
            units: meta.units,
            units_short: meta.units_short,
            source: meta.source,
            release: meta.release,
            last_updated: meta.last_updated,
            notes: meta.notes,
            seasonal_adjustment: meta.seasonal_adjustment,
            seasonal_adjustment_short: meta.seasonal_adjustment_short,
            observation_date: String::new(),
            frequency,
            frequency_short,
            t,
            date_range,
        })
    }

    /// Clone the metadata and replace the data, refreshing the date-range label.
    pub fn derive(&self, data: Vec<Observation>) -> Self {
        let mut out = self.clone();
        out.data = data;
        out.date_range = date_range_label(&out.data);
        out
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.data.iter().map(|(d, _)| *d).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.data.iter().map(|(_, v)| *v).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.data.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.data.last().map(|(d, _)| *d)
    }

    /// Value observed at `date`, if the date is in the index and not missing.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.data
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .and_then(|i| self.data[i].1)
    }

    /// Recognized frequency, if `frequency_short` is in the fixed table.
    pub fn frequency_kind(&self) -> Option<Frequency> {
        Frequency::from_short(&self.frequency_short)
    }

    pub fn has_missing(&self) -> bool {
        self.data.iter().any(|(_, v)| v.is_none())
    }

    /// All values as plain floats; fails when any observation is missing.
    pub fn complete_values(&self, operation: &str) -> Result<Vec<f64>, AppError> {
        self.data
            .iter()
            .map(|&(d, v)| {
                v.ok_or_else(|| {
                    AppError::invalid(format!(
                        "{operation}: missing observation at {d}; call drop_missing first"
                    ))
                })
            })
            .collect()
    }
}

/// `Range: <first> to <last>`, or `Range: Null` for no observations.
pub fn date_range_label(data: &[Observation]) -> String {
    match (data.first(), data.last()) {
        (Some((first, _)), Some((last, _))) => format!(
            "Range: {} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        ),
        _ => NULL_RANGE.to_string(),
    }
}

/// NaN is the host-arithmetic spelling of a missing value.
pub fn missing_if_nan(v: f64) -> Option<f64> {
    if v.is_nan() { None } else { Some(v) }
}
