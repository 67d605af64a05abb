//! Error types for vegwatch

use chrono::NaiveDate;
use thiserror::Error;

/// Failure reported by an [`ImageSource`](crate::ImageSource) for one date.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("image service failed for {date}: {reason}")]
    Service { date: NaiveDate, reason: String },

    #[error("no imagery available for {date}")]
    NotFound { date: NaiveDate },

    #[error("could not decode imagery for {date}: {reason}")]
    Decode { date: NaiveDate, reason: String },
}

impl FetchError {
    /// The reference date the failed request was made for
    pub fn date(&self) -> NaiveDate {
        match self {
            FetchError::Service { date, .. }
            | FetchError::NotFound { date }
            | FetchError::Decode { date, .. } => *date,
        }
    }
}

/// Main error type for vegwatch operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("No imagery for {date} under the strict fetch policy")]
    DataUnavailable {
        date: NaiveDate,
        #[source]
        source: FetchError,
    },

    #[error("Health analysis needs at least one time point")]
    InsufficientData,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for vegwatch operations
pub type Result<T> = std::result::Result<T, Error>;
