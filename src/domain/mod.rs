//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the labeled series value object (`LabeledSeries`)
//! - frequency codes and the observations-per-year table (`Frequency`)
//! - raw records exchanged with data sources (`RawSeriesRecord`, `RawMetadata`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
