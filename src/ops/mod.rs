//! Arithmetic over labeled series.
//!
//! - `arith`: operand dispatch and elementwise operators
//! - `meta`: metadata merging for series-with-series results

pub mod arith;
pub mod meta;

pub use arith::*;
pub use meta::*;
