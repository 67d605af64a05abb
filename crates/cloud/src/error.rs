//! Error types for the imagery sources.

use chrono::NaiveDate;
use thiserror::Error;
use vegwatch_core::FetchError;

/// Errors produced while fetching or decoding imagery.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("core error: {0}")]
    Core(#[from] vegwatch_core::Error),
}

impl CloudError {
    /// Attach the requested date and convert to the source-boundary error.
    pub fn into_fetch_error(self, date: NaiveDate) -> FetchError {
        match self {
            CloudError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                FetchError::NotFound { date }
            }
            CloudError::NotFound(_) => FetchError::NotFound { date },
            CloudError::Image(e) => FetchError::Decode {
                date,
                reason: e.to_string(),
            },
            CloudError::Core(e) => FetchError::Decode {
                date,
                reason: e.to_string(),
            },
            other => FetchError::Service {
                date,
                reason: other.to_string(),
            },
        }
    }
}

/// Result alias for imagery operations.
pub type Result<T> = std::result::Result<T, CloudError>;
