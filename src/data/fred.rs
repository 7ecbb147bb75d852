//! FRED/ALFRED API client.
//!
//! A series fetch takes four requests, all pinned to the vintage date with
//! `realtime_start = realtime_end = as_of`:
//!
//! - `fred/series` for the descriptive metadata
//! - `fred/series/observations` for the data
//! - `fred/series/release` for the release name and id
//! - `fred/release/sources` for the source name
//!
//! Rate-limit (429) and gateway-timeout (504) responses are retried with a
//! growing pause; any other failure status is returned immediately.

use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::FredConfig;
use crate::data::DataSource;
use crate::domain::{Observation, RawSeriesRecord};
use crate::error::AppError;

/// Base pause before a retry; attempt `n` waits `RETRY_BASE_SECS + n` seconds.
const RETRY_BASE_SECS: u64 = 5;

pub struct FredClient {
    client: Client,
    config: FredConfig,
}

impl FredClient {
    pub fn new(config: FredConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(FredConfig::from_env()?))
    }

    /// ALFRED vintage dates of `series_id`, oldest first.
    pub fn vintage_dates(&self, series_id: &str) -> Result<Vec<NaiveDate>, AppError> {
        let body: VintageDatesResponse =
            self.request("fred/series/vintagedates", &[("series_id", series_id.to_string())])?;
        body.vintage_dates
            .iter()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| AppError::upstream(format!("Invalid FRED vintage date '{raw}': {e}")))
            })
            .collect()
    }

    fn request<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, AppError> {
        let url = format!("{}{path}", self.config.base_url);
        let mut attempt: u32 = 0;
        loop {
            let resp = self
                .client
                .get(&url)
                .query(&[("api_key", self.config.api_key.as_str()), ("file_type", "json")])
                .query(params)
                .send()
                .map_err(|e| AppError::upstream(format!("FRED request to {path} failed: {e}")))?;

            let status = resp.status();
            if status.is_success() {
                return resp
                    .json()
                    .map_err(|e| AppError::upstream(format!("Failed to parse FRED response from {path}: {e}")));
            }

            if !is_retryable(status) {
                return Err(AppError::upstream(format!(
                    "FRED request to {path} failed with status {status}."
                )));
            }
            if attempt >= self.config.max_retries {
                return Err(AppError::upstream(format!(
                    "FRED request to {path} still failing with status {status} after {attempt} retries."
                )));
            }

            let pause = RETRY_BASE_SECS + u64::from(attempt);
            log::warn!("FRED API returned {status} for {path}; retrying in {pause} seconds");
            thread::sleep(Duration::from_secs(pause));
            attempt += 1;
        }
    }
}

impl DataSource for FredClient {
    fn fetch_series(&self, series_id: &str, as_of: NaiveDate) -> Result<RawSeriesRecord, AppError> {
        let vintage = as_of.format("%Y-%m-%d").to_string();
        let pinned = [
            ("series_id", series_id.to_string()),
            ("realtime_start", vintage.clone()),
            ("realtime_end", vintage.clone()),
        ];

        log::debug!("fetching {series_id} as of {vintage}");
        let series: SeriesResponse = self.request("fred/series", &pinned)?;
        let observations: ObservationsResponse = self.request("fred/series/observations", &pinned)?;
        let releases: ReleasesResponse = self.request("fred/series/release", &pinned)?;

        let release = releases
            .releases
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream(format!("No release listed for series {series_id}.")))?;
        let sources: SourcesResponse = self.request(
            "fred/release/sources",
            &[("series_id", series_id.to_string()), ("release_id", release.id.to_string())],
        )?;

        assemble_record(series_id, series, observations, release, sources)
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::GATEWAY_TIMEOUT
}

fn assemble_record(
    series_id: &str,
    series: SeriesResponse,
    observations: ObservationsResponse,
    release: Release,
    sources: SourcesResponse,
) -> Result<RawSeriesRecord, AppError> {
    let info = series
        .seriess
        .into_iter()
        .next()
        .ok_or_else(|| AppError::upstream(format!("No metadata returned for series {series_id}.")))?;
    let source = sources
        .sources
        .into_iter()
        .next()
        .ok_or_else(|| AppError::upstream(format!("No source listed for series {series_id}.")))?;

    let mut data: Vec<Observation> = Vec::with_capacity(observations.observations.len());
    for obs in observations.observations {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| AppError::upstream(format!("Invalid FRED date '{}': {e}", obs.date)))?;
        data.push((date, parse_value(&obs.value)));
    }

    Ok(RawSeriesRecord {
        title: info.title,
        frequency: info.frequency,
        frequency_short: info.frequency_short,
        units: info.units,
        units_short: info.units_short,
        seasonal_adjustment: info.seasonal_adjustment,
        seasonal_adjustment_short: info.seasonal_adjustment_short,
        last_updated: info.last_updated,
        notes: info.notes,
        release: release.name,
        source: source.name,
        observations: data,
    })
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<SeriesInfo>,
}

#[derive(Debug, Deserialize)]
struct SeriesInfo {
    title: String,
    frequency: String,
    frequency_short: String,
    units: String,
    units_short: String,
    seasonal_adjustment: String,
    seasonal_adjustment_short: String,
    last_updated: String,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<ObservationRow>,
}

#[derive(Debug, Deserialize)]
struct ObservationRow {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ReleasesResponse {
    releases: Vec<Release>,
}

#[derive(Debug, Deserialize)]
struct Release {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SourcesResponse {
    sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VintageDatesResponse {
    vintage_dates: Vec<String>,
}

/// FRED writes missing observations as `"."`.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_missing() {
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value(" 12.5 "), Some(12.5));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn only_rate_limit_and_gateway_timeout_retry() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::GATEWAY_TIMEOUT));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn assembles_record_from_responses() {
        let series: SeriesResponse = serde_json::from_str(
            r#"{"seriess":[{"id":"GDP","title":"Gross Domestic Product","frequency":"Quarterly",
                "frequency_short":"Q","units":"Billions of Dollars","units_short":"Bil. of $",
                "seasonal_adjustment":"Seasonally Adjusted Annual Rate","seasonal_adjustment_short":"SAAR",
                "last_updated":"2024-01-25 07:55:02-06"}]}"#,
        )
        .unwrap();
        let observations: ObservationsResponse = serde_json::from_str(
            r#"{"observations":[
                {"realtime_start":"2024-02-01","date":"2023-07-01","value":"27610.1"},
                {"realtime_start":"2024-02-01","date":"2023-10-01","value":"."}]}"#,
        )
        .unwrap();
        let releases: ReleasesResponse =
            serde_json::from_str(r#"{"releases":[{"id":53,"name":"Gross Domestic Product"}]}"#).unwrap();
        let sources: SourcesResponse =
            serde_json::from_str(r#"{"sources":[{"id":18,"name":"U.S. Bureau of Economic Analysis"}]}"#).unwrap();

        let release = releases.releases.into_iter().next().unwrap();
        let record = assemble_record("GDP", series, observations, release, sources).unwrap();
        assert_eq!(record.frequency_short, "Q");
        assert_eq!(record.notes, None);
        assert_eq!(record.release, "Gross Domestic Product");
        assert_eq!(record.source, "U.S. Bureau of Economic Analysis");
        assert_eq!(record.observations.len(), 2);
        assert_eq!(record.observations[0].1, Some(27610.1));
        assert_eq!(record.observations[1].1, None);
    }

    #[test]
    fn empty_metadata_is_an_error() {
        let series = SeriesResponse { seriess: Vec::new() };
        let observations = ObservationsResponse { observations: Vec::new() };
        let release = Release { id: 1, name: "R".to_string() };
        let sources = SourcesResponse { sources: vec![Source { name: "S".to_string() }] };
        let err = assemble_record("X", series, observations, release, sources).unwrap_err();
        assert!(matches!(err, AppError::DataSource(_)));
    }
}
