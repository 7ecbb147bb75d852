//! `fred-series` library crate.
//!
//! The binary (`fred`) is a thin wrapper around this library so that:
//!
//! - series transformations and filters are testable without spawning processes
//! - data sources can be swapped (FRED API, synthetic, in-memory test doubles)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod filters;
pub mod io;
pub mod math;
pub mod ops;
pub mod plot;
pub mod report;
pub mod transform;
pub mod window;
