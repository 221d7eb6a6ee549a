//! Domain layer - Pure search abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no reqwest).
//! Only data types, the fetcher trait and domain error types.

pub mod errors;
pub mod fetcher;
pub mod models;

pub use errors::{FetchError, SearchError, ValidationError};
pub use fetcher::{BookFetcher, DEFAULT_TIMEOUT};
pub use models::*;
