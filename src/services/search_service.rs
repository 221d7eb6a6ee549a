//! Search Service - the author search pipeline without any HTTP layer
//!
//! Stages run strictly in order: query builder, bounded fetch, normalizer,
//! sorter, presenter. Validation and fetch failures short-circuit; every
//! path ends with the loading state cleared so the user can search again.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    BookFetcher, BookView, DEFAULT_TIMEOUT, FetchError, SearchError, SearchInput, SortMode,
    ValidationError,
};
use crate::services::messages;
use crate::services::presenter::{AlertLevel, Presenter};
use crate::{normalize, query, sort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Input rejected before any network call
    Rejected(ValidationError),
    /// The bounded request failed
    Failed(FetchError),
    /// Endpoint reported zero matches
    NoResults,
    Found { total: u64, books: Vec<BookView> },
}

impl SearchOutcome {
    /// Label used in logs and API responses.
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Rejected(_) => "invalid",
            SearchOutcome::Failed(_) => "failed",
            SearchOutcome::NoResults => "no_results",
            SearchOutcome::Found { .. } => "results",
        }
    }

    /// Collapses the outcome into the error channels. No results is an
    /// empty success.
    pub fn into_result(self) -> Result<Vec<BookView>, SearchError> {
        match self {
            SearchOutcome::Rejected(e) => Err(e.into()),
            SearchOutcome::Failed(e) => Err(e.into()),
            SearchOutcome::NoResults => Ok(Vec::new()),
            SearchOutcome::Found { books, .. } => Ok(books),
        }
    }
}

#[derive(Clone)]
pub struct SearchService {
    fetcher: Arc<dyn BookFetcher>,
    timeout: Duration,
}

impl SearchService {
    pub fn new(fetcher: Arc<dyn BookFetcher>) -> Self {
        Self::with_timeout(fetcher, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(fetcher: Arc<dyn BookFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one search and drive `presenter` through it.
    pub async fn run(
        &self,
        input: &SearchInput,
        sort_mode: SortMode,
        presenter: &dyn Presenter,
    ) -> SearchOutcome {
        presenter.reset();

        let query = match query::build(input, sort_mode) {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!("Search rejected: {}", e);
                presenter.show_alert(AlertLevel::Warning, messages::validation_message(&e));
                presenter.set_loading(false, "");
                return SearchOutcome::Rejected(e);
            }
        };

        presenter.set_loading(true, &messages::loading_message(&query.author));
        tracing::info!(
            "Search started: author={:?} sort={}",
            query.author,
            query.sort_mode.as_str()
        );

        let payload = match self.fetcher.fetch(&query, self.timeout).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(kind = e.kind(), "Search failed: {}", e);
                presenter.show_alert(AlertLevel::Danger, messages::FAILURE_MESSAGE);
                presenter.set_loading(false, "");
                return SearchOutcome::Failed(e);
            }
        };

        let total = payload.num_found;
        let books = sort::sort(normalize::normalize(&payload.docs), query.sort_mode);
        presenter.show_total(total);

        if total == 0 {
            tracing::info!("Search finished: no results for {:?}", query.author);
            presenter.show_alert(AlertLevel::Info, &messages::no_results_message(&query.author));
            presenter.set_loading(false, "");
            return SearchOutcome::NoResults;
        }

        tracing::info!(
            "Search finished: {} of {} results for {:?}",
            books.len(),
            total,
            query.author
        );
        presenter.render_books(&books);
        presenter.set_loading(false, &messages::results_message(query.limit, total));

        SearchOutcome::Found { total, books }
    }
}
