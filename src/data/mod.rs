//! Where series come from.
//!
//! - `fred`: the FRED/ALFRED HTTP API
//! - `sample`: seeded synthetic series for offline use
//! - `repository`: cached retrieval on top of any `DataSource`
//! - `cycle`: business-cycle reference dates

use chrono::NaiveDate;

use crate::domain::RawSeriesRecord;
use crate::error::AppError;

pub mod cycle;
pub mod fred;
pub mod repository;
pub mod sample;

pub use cycle::*;
pub use fred::FredClient;
pub use repository::SeriesRepository;
pub use sample::SyntheticSource;

/// Raw observations plus metadata for one series at one vintage.
pub trait DataSource {
    fn fetch_series(&self, series_id: &str, as_of: NaiveDate) -> Result<RawSeriesRecord, AppError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch_series(&self, series_id: &str, as_of: NaiveDate) -> Result<RawSeriesRecord, AppError> {
        (**self).fetch_series(series_id, as_of)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn fetch_series(&self, series_id: &str, as_of: NaiveDate) -> Result<RawSeriesRecord, AppError> {
        (**self).fetch_series(series_id, as_of)
    }
}
