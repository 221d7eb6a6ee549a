//! Fetcher trait definition
//!
//! This trait defines the contract for the bounded search request.
//! The Open Library implementation lives in `modules::integrations`.

use async_trait::async_trait;
use std::time::Duration;

use super::{FetchError, RawPayload, SearchQuery};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

#[async_trait]
pub trait BookFetcher: Send + Sync {
    /// Issue one request for `query`. Must give up with
    /// `FetchError::Timeout` once `timeout` has elapsed.
    async fn fetch(&self, query: &SearchQuery, timeout: Duration) -> Result<RawPayload, FetchError>;
}
