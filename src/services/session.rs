//! Single active-search model.
//!
//! Submitting a search aborts the one still in flight, which drops its
//! request and its timer. Presenter calls are tagged with a generation so a
//! superseded search can never write over fresher results.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::{AbortHandle, JoinHandle};

use crate::domain::{BookView, SearchInput, SortMode};
use crate::services::presenter::{AlertLevel, Presenter};
use crate::services::search_service::{SearchOutcome, SearchService};

#[derive(Default)]
struct SessionState {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

pub struct SearchSession {
    service: SearchService,
    presenter: Arc<dyn Presenter>,
    state: Mutex<SessionState>,
}

impl SearchSession {
    pub fn new(service: SearchService, presenter: Arc<dyn Presenter>) -> Arc<Self> {
        Arc::new(Self {
            service,
            presenter,
            state: Mutex::new(SessionState::default()),
        })
    }

    /// Start a search, superseding any pending one. The returned handle
    /// resolves to a cancellation error if this search is itself superseded.
    pub fn submit(self: &Arc<Self>, input: SearchInput, sort_mode: SortMode) -> JoinHandle<SearchOutcome> {
        let mut state = self.lock();
        if let Some(previous) = state.in_flight.take() {
            tracing::debug!("Superseding search generation {}", state.generation);
            previous.abort();
        }
        state.generation += 1;
        let generation = state.generation;

        let session = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let presenter = CurrentOnly {
                session: &session,
                generation,
            };
            let outcome = session.service.run(&input, sort_mode, &presenter).await;
            session.finish(generation);
            outcome
        });
        state.in_flight = Some(handle.abort_handle());
        handle
    }

    /// Abort the pending search, if any, and clear the loading state.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
            state.generation += 1;
            self.presenter.set_loading(false, "");
        }
    }

    /// True while a search is pending; adapters use it to disable resubmission.
    pub fn is_searching(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    fn finish(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation == generation {
            state.in_flight = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Forwards to the session presenter only while `generation` is current.
struct CurrentOnly<'a> {
    session: &'a SearchSession,
    generation: u64,
}

impl CurrentOnly<'_> {
    fn forward(&self, f: impl FnOnce(&dyn Presenter)) {
        let state = self.session.lock();
        if state.generation == self.generation {
            f(self.session.presenter.as_ref());
        }
    }
}

impl Presenter for CurrentOnly<'_> {
    fn reset(&self) {
        self.forward(|p| p.reset());
    }

    fn set_loading(&self, loading: bool, message: &str) {
        self.forward(|p| p.set_loading(loading, message));
    }

    fn show_alert(&self, level: AlertLevel, message: &str) {
        self.forward(|p| p.show_alert(level, message));
    }

    fn show_total(&self, total: u64) {
        self.forward(|p| p.show_total(total));
    }

    fn render_books(&self, books: &[BookView]) {
        self.forward(|p| p.render_books(books));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookFetcher, FetchError, RawPayload, SearchQuery};
    use crate::services::presenter::RecordingPresenter;
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;

    /// Authors starting with "Slow" take a long time to answer.
    struct DelayedFetcher;

    #[async_trait]
    impl BookFetcher for DelayedFetcher {
        async fn fetch(&self, query: &SearchQuery, _timeout: Duration) -> Result<RawPayload, FetchError> {
            if query.author.starts_with("Slow") {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(RawPayload::from(json!({
                "numFound": 1,
                "docs": [{ "title": format!("Book by {}", query.author) }]
            })))
        }
    }

    fn session() -> (Arc<SearchSession>, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::new());
        let service = SearchService::new(Arc::new(DelayedFetcher));
        (SearchSession::new(service, presenter.clone()), presenter)
    }

    #[tokio::test(start_paused = true)]
    async fn newer_search_supersedes_pending_one() {
        let (session, presenter) = session();

        let stale = session.submit(SearchInput::new("Slow Author"), SortMode::Relevance);
        tokio::task::yield_now().await;
        assert!(session.is_searching());

        let fresh = session.submit(SearchInput::new("Fast Author"), SortMode::Relevance);
        let outcome = fresh.await.expect("fresh search completes");
        assert!(matches!(outcome, SearchOutcome::Found { .. }));

        let stale = stale.await;
        assert!(stale.unwrap_err().is_cancelled());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let state = presenter.snapshot();
        assert_eq!(state.books.len(), 1);
        assert_eq!(state.books[0].title, "Book by Fast Author");
        assert!(!state.loading);
        assert!(!session.is_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn flag_tracks_pending_search() {
        let (session, presenter) = session();
        assert!(!session.is_searching());

        let handle = session.submit(SearchInput::new("Slow Author"), SortMode::Relevance);
        tokio::task::yield_now().await;
        assert!(session.is_searching());
        assert!(presenter.snapshot().loading);

        handle.await.expect("search completes");
        assert!(!session.is_searching());
        assert!(!presenter.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_clears_loading_state() {
        let (session, presenter) = session();

        let handle = session.submit(SearchInput::new("Slow Author"), SortMode::Relevance);
        tokio::task::yield_now().await;
        session.cancel();

        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(!session.is_searching());
        let state = presenter.snapshot();
        assert!(!state.loading);
        assert!(state.books.is_empty());
    }
}
