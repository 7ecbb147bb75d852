//! Session-scoped memoization of fetched series.
//!
//! Entries are keyed by series id and vintage date, never evicted, and
//! handed out as clones so callers cannot alter the cached snapshot.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::domain::LabeledSeries;
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: Mutex<HashMap<String, LabeledSeries>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<series_id>_<YYYY-MM-DD>`
    pub fn key(series_id: &str, as_of: NaiveDate) -> String {
        format!("{series_id}_{}", as_of.format("%Y-%m-%d"))
    }

    pub fn get(&self, series_id: &str, as_of: NaiveDate) -> Option<LabeledSeries> {
        let key = Self::key(series_id, as_of);
        let hit = self.lock().get(&key).cloned();
        log::debug!("cache {} for {key}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    /// Store `series`, replacing any existing entry.
    pub fn put(&self, series_id: &str, as_of: NaiveDate, series: &LabeledSeries) {
        self.lock().insert(Self::key(series_id, as_of), series.clone());
    }

    /// Return the cached entry, or run `fetch` and cache its result.
    ///
    /// The lock is held while `fetch` runs, so concurrent callers asking for
    /// the same key trigger a single fetch. Failed fetches are not cached.
    pub fn get_or_try_insert_with<F>(
        &self,
        series_id: &str,
        as_of: NaiveDate,
        fetch: F,
    ) -> Result<LabeledSeries, AppError>
    where
        F: FnOnce() -> Result<LabeledSeries, AppError>,
    {
        let key = Self::key(series_id, as_of);
        let mut entries = self.lock();
        if let Some(series) = entries.get(&key) {
            log::debug!("cache hit for {key}");
            return Ok(series.clone());
        }

        log::debug!("cache miss for {key}");
        let series = fetch()?;
        entries.insert(key, series.clone());
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock leaves the map itself intact.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, LabeledSeries>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
