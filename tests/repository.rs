use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use fred_series::cache::SeriesCache;
use fred_series::data::{DataSource, SeriesRepository};
use fred_series::domain::{Observation, RawSeriesRecord};
use fred_series::error::AppError;
use fred_series::transform::PopulationBasis;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(title: &str, freq: &str, freq_short: &str, observations: Vec<Observation>) -> RawSeriesRecord {
    RawSeriesRecord {
        title: title.to_string(),
        frequency: freq.to_string(),
        frequency_short: freq_short.to_string(),
        units: "Billions of Dollars".to_string(),
        units_short: "Bil. of $".to_string(),
        seasonal_adjustment: "Seasonally Adjusted".to_string(),
        seasonal_adjustment_short: "SA".to_string(),
        last_updated: "2024-01-25".to_string(),
        notes: None,
        release: "Test Release".to_string(),
        source: "Test Source".to_string(),
        observations,
    }
}

/// Serves fixed records and counts fetches.
struct InMemorySource {
    records: HashMap<String, RawSeriesRecord>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    fn new() -> Self {
        let gdp = record(
            "Gross Domestic Product",
            "Quarterly",
            "Q",
            vec![(d(2020, 1, 1), Some(100.0)), (d(2020, 4, 1), Some(90.0)), (d(2020, 7, 1), Some(99.0))],
        );
        // Monthly population in thousands, one quarter longer than GDP.
        let population: Vec<Observation> = (1..=12).map(|m| (d(2020, m, 1), Some(1000.0 + m as f64))).collect();
        let pop = record("Population", "Monthly", "M", population);

        let records = [("GDP".to_string(), gdp), ("CNP16OV".to_string(), pop)].into_iter().collect();
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataSource for InMemorySource {
    fn fetch_series(&self, series_id: &str, _as_of: NaiveDate) -> Result<RawSeriesRecord, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(series_id)
            .cloned()
            .ok_or_else(|| AppError::DataSource(format!("unknown series {series_id}")))
    }
}

#[test]
fn fetch_populates_metadata() {
    let repo = SeriesRepository::new(InMemorySource::new());
    let gdp = repo.fetch("GDP", Some(d(2024, 2, 1)), true).unwrap();

    assert_eq!(gdp.series_id, "GDP");
    assert_eq!(gdp.t, Some(4));
    assert_eq!(gdp.notes, "");
    assert_eq!(gdp.observation_date, "2024-02-01");
    assert_eq!(gdp.date_range, "Range: 2020-01-01 to 2020-07-01");
    assert_eq!(gdp.len(), 3);
}

#[test]
fn cache_hit_skips_source() {
    let repo = SeriesRepository::new(InMemorySource::new());
    let as_of = Some(d(2024, 2, 1));

    repo.fetch("GDP", as_of, true).unwrap();
    repo.fetch("GDP", as_of, true).unwrap();
    assert_eq!(repo.source().fetches(), 1);

    // A different vintage is a different entry.
    repo.fetch("GDP", Some(d(2024, 3, 1)), true).unwrap();
    assert_eq!(repo.source().fetches(), 2);

    // Opting out neither reads nor writes the cache.
    repo.fetch("GDP", as_of, false).unwrap();
    assert_eq!(repo.source().fetches(), 3);
    assert_eq!(repo.cache().len(), 2);
}

#[test]
fn cached_copy_is_independent() {
    let cache = Arc::new(SeriesCache::new());
    let repo = SeriesRepository::with_cache(InMemorySource::new(), Arc::clone(&cache));
    let as_of = Some(d(2024, 2, 1));

    let mut first = repo.fetch("GDP", as_of, true).unwrap();
    first.data[0].1 = None;
    first.title.push_str(" (edited)");

    let second = repo.fetch("GDP", as_of, true).unwrap();
    assert_eq!(second.data[0].1, Some(100.0));
    assert_eq!(second.title, "Gross Domestic Product");
    assert_eq!(cache.get("GDP", d(2024, 2, 1)), Some(second));
}

#[test]
fn unknown_series_is_data_source_error_and_not_cached() {
    let repo = SeriesRepository::new(InMemorySource::new());
    let err = repo.fetch("NOPE", Some(d(2024, 2, 1)), true).unwrap_err();
    assert!(matches!(err, AppError::DataSource(_)));
    assert_eq!(err.exit_code(), 4);
    assert!(repo.cache().is_empty());
}

#[test]
fn per_capita_uses_quarterly_mean_population() {
    let repo = SeriesRepository::new(InMemorySource::new());
    let gdp = repo.fetch("GDP", Some(d(2024, 2, 1)), true).unwrap();
    let pc = repo.per_capita(&gdp, PopulationBasis::Civilian16Plus).unwrap();

    // Quarterly means of 1001..=1012 are 1002, 1005, 1008, 1011; the window
    // is GDP's three quarters.
    let expected = [100.0 / 1002.0, 90.0 / 1005.0, 99.0 / 1008.0];
    assert_eq!(pc.len(), 3);
    for (got, want) in pc.values().iter().zip(expected) {
        assert!((got.unwrap() - want).abs() < 1e-12);
    }
    assert_eq!(pc.title, "Gross Domestic Product Per Capita");
    assert_eq!(pc.units, "Billions of Dollars Per Thousand People");
    assert_eq!(gdp.len(), 3);
    assert_eq!(gdp.title, "Gross Domestic Product");
}
