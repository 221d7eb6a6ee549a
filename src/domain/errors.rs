//! Domain error types
//!
//! These errors are framework-agnostic and represent search-level failures.
//! Validation errors are raised before any network call; fetch errors are
//! raised by the bounded fetcher. Normalization and sorting never fail.

use thiserror::Error;

/// Rejected user input. Reported to the user as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Trimmed author text has fewer than two characters
    #[error("author text must contain at least 2 characters")]
    TooShort,
    /// A year bound is below 1000 or is not a number
    #[error("year must be greater than or equal to 1000")]
    InvalidYear,
}

/// Failure of the single bounded request to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("search request timed out")]
    Timeout,
    #[error("search endpoint returned HTTP {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Stable classification label, used in logs and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "timeout",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Transport(_) => "transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
