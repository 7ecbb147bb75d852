//! Output helpers.
//!
//! - series exports as CSV or JSON (`export`)

pub mod export;

pub use export::*;
