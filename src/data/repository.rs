//! Cached series retrieval.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::cache::SeriesCache;
use crate::data::DataSource;
use crate::domain::LabeledSeries;
use crate::error::AppError;
use crate::transform::{PopulationBasis, ResampleMethod};

/// Fetches series through a `DataSource`, memoizing them in a shared cache.
pub struct SeriesRepository<S> {
    source: S,
    cache: Arc<SeriesCache>,
}

impl<S: DataSource> SeriesRepository<S> {
    pub fn new(source: S) -> Self {
        Self::with_cache(source, Arc::new(SeriesCache::new()))
    }

    pub fn with_cache(source: S, cache: Arc<SeriesCache>) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &Arc<SeriesCache> {
        &self.cache
    }

    /// Series `series_id` as observed on `as_of` (today when `None`).
    ///
    /// With `use_cache`, a cached vintage is returned as a copy and a fresh
    /// fetch is stored; without it the cache is neither read nor written.
    pub fn fetch(
        &self,
        series_id: &str,
        as_of: Option<NaiveDate>,
        use_cache: bool,
    ) -> Result<LabeledSeries, AppError> {
        let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
        let load = || {
            let record = self.source.fetch_series(series_id, as_of)?;
            LabeledSeries::from_record(series_id, as_of, record)
        };

        if use_cache {
            self.cache.get_or_try_insert_with(series_id, as_of, load)
        } else {
            load()
        }
    }

    /// `series` divided by population, at the same vintage as `series`.
    ///
    /// The population series is averaged to the frequency of `series` before
    /// dividing.
    pub fn per_capita(&self, series: &LabeledSeries, basis: PopulationBasis) -> Result<LabeledSeries, AppError> {
        let freq = series.frequency_kind().ok_or_else(|| {
            AppError::invalid(format!(
                "per_capita: unrecognized frequency '{}' for {}",
                series.frequency_short, series.series_id
            ))
        })?;
        let as_of = NaiveDate::parse_from_str(&series.observation_date, "%Y-%m-%d").ok();
        let population = self
            .fetch(basis.series_id(), as_of, true)?
            .as_frequency(freq, ResampleMethod::Mean)?;
        Ok(series.per_capita_with(&population))
    }
}
