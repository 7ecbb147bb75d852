//! Series transformations.
//!
//! Each operation is a method on `LabeledSeries` returning a new series:
//!
//! - `growth`: `log`, `apc`, `pc`
//! - `resample`: `as_frequency`
//! - `smooth`: `ma`, `recent`, `drop_missing`, `per_capita_with`
//!
//! Trend/cycle decompositions live in `crate::filters`.

pub mod growth;
pub mod resample;
pub mod smooth;

pub use resample::*;
pub use smooth::*;
