//! Terminal reports for series and filter output.

pub mod format;

pub use format::*;
