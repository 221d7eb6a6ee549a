//! Open Library search integration
//!
//! Bounded fetcher for `search.json` plus the cover and detail URL helpers
//! used by presentation adapters.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::domain::{BookFetcher, CoverId, FetchError, RawPayload, SearchQuery};

pub const SEARCH_URL: &str = "https://openlibrary.org/search.json";
const COVERS_URL: &str = "https://covers.openlibrary.org/b/id";
const ISBN_URL: &str = "https://openlibrary.org/isbn";
const USER_AGENT: &str = concat!("bibliosearch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: reqwest::Client,
    search_url: Url,
}

impl OpenLibraryClient {
    pub fn new(search_url: &str) -> Result<Self, String> {
        let search_url = Url::parse(search_url)
            .map_err(|e| format!("Invalid search URL '{}': {}", search_url, e))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to build client: {}", e))?;

        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl BookFetcher for OpenLibraryClient {
    async fn fetch(&self, query: &SearchQuery, timeout: Duration) -> Result<RawPayload, FetchError> {
        tracing::debug!(
            "Open Library search: url={} q={}",
            self.search_url,
            query.query_string()
        );

        let request = async {
            let resp = self
                .client
                .get(self.search_url.clone())
                .query(&query.params()[..])
                .header(ACCEPT, "application/json")
                .send()
                .await
                .map_err(transport_error)?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            let body: Value = resp.json().await.map_err(transport_error)?;
            Ok::<RawPayload, FetchError>(RawPayload::from(body))
        };

        // Dropping the request future on expiry cancels the in-flight call.
        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        }
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

pub fn cover_url(cover_id: CoverId, size: CoverSize) -> String {
    format!("{}/{}-{}.jpg", COVERS_URL, cover_id, size.suffix())
}

pub fn detail_url(isbn: &str) -> String {
    format!("{}/{}", ISBN_URL, urlencoding::encode(isbn))
}
