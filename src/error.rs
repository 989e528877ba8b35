// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path not found: '{path}'")]
    NotFound { path: String },

    #[error("Rate limited or access denied ({status}) for {url}")]
    RateLimited { status: u16, url: String },

    #[error("Forge request failed: {0}")]
    Forge(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScanError {
    pub fn not_found(path: impl Into<String>) -> Self {
        ScanError::NotFound { path: path.into() }
    }

    /// True for the expected "path absent" outcome, false for every transient fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::NotFound { .. })
    }
}
