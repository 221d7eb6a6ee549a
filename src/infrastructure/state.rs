//! Application state containing the search service

use std::sync::Arc;

use crate::infrastructure::config::Config;
use crate::openlibrary::OpenLibraryClient;
use crate::services::SearchService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search: Arc::new(search),
        }
    }

    /// Wire the Open Library client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let client = OpenLibraryClient::new(&config.search_url)?;
        Ok(Self::new(SearchService::with_timeout(
            Arc::new(client),
            config.search_timeout,
        )))
    }
}
