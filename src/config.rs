//! FRED API configuration from the environment.

use std::fs;
use std::path::Path;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/";
pub const DEFAULT_KEY_FILE: &str = "fred_api_key.txt";
pub const DEFAULT_MAX_RETRIES: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct FredConfig {
    pub api_key: String,
    /// Endpoint root, always ending in `/`.
    pub base_url: String,
    /// Retries on HTTP 429/504 before giving up.
    pub max_retries: u32,
}

impl FredConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Load `.env`, then read `FRED_API_KEY`, falling back to the key file
    /// named by `FRED_API_KEY_FILE` (default `fred_api_key.txt`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same resolution as `from_env`, reading variables through `var`.
    pub fn from_lookup<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match var("FRED_API_KEY").map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => key,
            _ => {
                let path = var("FRED_API_KEY_FILE").unwrap_or_else(|| DEFAULT_KEY_FILE.to_string());
                load_api_key(Path::new(&path))?
            }
        };

        let mut base_url = var("FRED_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            api_key,
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }
}

/// First line of `path`, trimmed.
pub fn load_api_key(path: &Path) -> Result<String, AppError> {
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "missing FRED_API_KEY in environment (.env) and cannot read key file {}: {e}",
            path.display()
        ))
    })?;
    let key = text.lines().next().unwrap_or("").trim().to_string();
    if key.is_empty() {
        return Err(AppError::Configuration(format!("key file {} is empty", path.display())));
    }
    Ok(key)
}
