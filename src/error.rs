//! Crate-wide error type.
//!
//! Every variant carries a human-readable message and maps to a process exit
//! code, so the binary can report failures the same way regardless of which
//! layer raised them.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Required setup (API key, endpoint) is missing or unreadable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Upstream fetch or parse failure.
    #[error("data source error: {0}")]
    DataSource(String),

    /// Two series (or a series and an array) do not share the same index.
    #[error("index mismatch: {0}")]
    IndexMismatch(String),

    /// Unrecognized frequency, resampling method, or filter parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("io error: {0}")]
    Io(String),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Configuration(_) => 2,
            AppError::InvalidParameter(_) => 3,
            AppError::DataSource(_) => 4,
            AppError::IndexMismatch(_) => 5,
            AppError::Io(_) => 6,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidParameter(message.into())
    }

    pub(crate) fn upstream(message: impl Into<String>) -> Self {
        AppError::DataSource(message.into())
    }
}
