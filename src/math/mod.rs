//! Numerical utilities: least squares and banded linear solves.

pub mod banded;
pub mod ols;

pub use banded::*;
pub use ols::*;
