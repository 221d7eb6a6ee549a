use std::env;
use std::time::Duration;

use crate::openlibrary::SEARCH_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub search_url: String,
    pub search_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(8000),
            search_url: lookup("OPENLIBRARY_SEARCH_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| SEARCH_URL.to_string()),
            search_timeout: Duration::from_millis(
                lookup("SEARCH_TIMEOUT_MS")
                    .and_then(|t| t.trim().parse().ok())
                    .filter(|ms| *ms > 0)
                    .unwrap_or(10_000),
            ),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
