//! Trend/cycle decomposition filters.
//!
//! Every filter returns a `Decomposition`: the cyclical component (units
//! relabeled as a deviation from trend) and the trend component (input
//! units). The input series must have no missing observations.
//!
//! Default parameters are used only when *all* tunable parameters are unset
//! and the series frequency has a recommendation; partially specified
//! parameters are rejected rather than mixed with defaults.

pub mod bandpass;
pub mod cf;
pub mod diff;
pub mod hp;
pub mod linear;

pub use bandpass::*;
pub use cf::*;
pub use hp::*;

use crate::domain::{LabeledSeries, Observation};

pub const CYCLE_UNITS: &str = "Deviation relative to trend";
pub const CYCLE_UNITS_SHORT: &str = "Dev. rel. to trend";

#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub cycle: LabeledSeries,
    pub trend: LabeledSeries,
}

impl Decomposition {
    /// Build both components from `source`, annotating titles with `method`.
    pub(crate) fn labeled(
        source: &LabeledSeries,
        method: &str,
        cycle: Vec<Observation>,
        trend: Vec<Observation>,
    ) -> Self {
        let mut c = source.derive(cycle);
        c.units = CYCLE_UNITS.to_string();
        c.units_short = CYCLE_UNITS_SHORT.to_string();
        c.title = format!("{} - deviation relative to trend ({method})", source.title);

        let mut t = source.derive(trend);
        t.title = format!("{} - trend ({method})", source.title);

        Self { cycle: c, trend: t }
    }
}

/// Zip dates with plain values.
pub(crate) fn observations(dates: &[chrono::NaiveDate], values: &[f64]) -> Vec<Observation> {
    dates.iter().zip(values).map(|(&d, &v)| (d, Some(v))).collect()
}
