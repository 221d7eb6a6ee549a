pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod normalize;
pub mod query;
pub mod services;
pub mod sort;

pub use infrastructure::config;
pub use infrastructure::server;
pub use modules::integrations::openlibrary;

pub use domain::{BookView, FetchError, SearchError, SearchInput, SearchQuery, SortMode, ValidationError};
pub use services::{SearchOutcome, SearchService, SearchSession};
