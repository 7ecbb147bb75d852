//! Shared domain types.
//!
//! These are the plain records exchanged at the edges of the engine:
//!
//! - observation frequency (`Frequency`) and its fixed observations-per-year table
//! - raw records returned by a `DataSource` (`RawSeriesRecord`)
//! - caller-supplied metadata for building a series by hand (`RawMetadata`)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single dated observation. `None` marks a missing value.
pub type Observation = (NaiveDate, Option<f64>);

/// Observation frequency of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    /// Abbreviated code as used by FRED (`D`, `W`, `M`, `Q`, `SA`, `A`).
    pub fn short(self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::Semiannual => "SA",
            Frequency::Annual => "A",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannual => "Semiannual",
            Frequency::Annual => "Annual",
        }
    }

    /// Number of observations per year (the `t` attribute of a series).
    pub fn obs_per_year(self) -> u32 {
        match self {
            Frequency::Daily => 365,
            Frequency::Weekly => 52,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::Semiannual => 2,
            Frequency::Annual => 1,
        }
    }

    pub fn from_short(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.short() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl FromStr for Frequency {
    type Err = AppError;

    /// Accepts either the short code or the full name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Frequency::from_short(s)
            .or_else(|| Frequency::from_name(s))
            .ok_or_else(|| AppError::invalid(format!("unrecognized frequency '{s}'")))
    }
}

/// Raw output of a `DataSource` fetch for one series at one vintage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeriesRecord {
    pub title: String,
    pub frequency: String,
    pub frequency_short: String,
    pub units: String,
    pub units_short: String,
    pub seasonal_adjustment: String,
    pub seasonal_adjustment_short: String,
    pub last_updated: String,
    pub notes: Option<String>,
    pub release: String,
    pub source: String,
    pub observations: Vec<Observation>,
}

/// Metadata for building a series from caller-supplied arrays.
///
/// Every field defaults to empty. When `frequency` or `frequency_short` is a
/// recognized value the other one and `t` are filled in from the fixed table;
/// otherwise the given `t` is kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetadata {
    pub frequency: String,
    pub frequency_short: String,
    pub last_updated: String,
    pub notes: String,
    pub release: String,
    pub seasonal_adjustment: String,
    pub seasonal_adjustment_short: String,
    pub series_id: String,
    pub source: String,
    pub t: Option<u32>,
    pub title: String,
    pub units: String,
    pub units_short: String,
}

/// Parse a date given as `YYYY-MM-DD` or `MM-DD-YYYY`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m-%d-%Y"))
        .map_err(|_| AppError::invalid(format!("invalid date '{raw}', expected YYYY-MM-DD or MM-DD-YYYY")))
}
