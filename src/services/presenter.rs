//! Presentation adapter seam
//!
//! The pipeline only talks to display state through [`Presenter`]. Adapters
//! receive plain data and have no way to write back into the search.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::domain::BookView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

pub trait Presenter: Send + Sync {
    /// Clears alerts, results and the total before a new search.
    fn reset(&self);
    fn set_loading(&self, loading: bool, message: &str);
    fn show_alert(&self, level: AlertLevel, message: &str);
    fn show_total(&self, total: u64);
    fn render_books(&self, books: &[BookView]);
}

/// Display state as last left by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub loading: bool,
    pub status: String,
    pub alerts: Vec<Alert>,
    pub total: Option<u64>,
    pub books: Vec<BookView>,
}

/// Presenter that keeps everything in memory. Used by the HTTP surface to
/// build its response, and by tests.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    state: Mutex<PresentationState>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PresentationState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PresentationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Presenter for RecordingPresenter {
    fn reset(&self) {
        let mut state = self.lock();
        state.alerts.clear();
        state.books.clear();
        state.total = None;
    }

    fn set_loading(&self, loading: bool, message: &str) {
        let mut state = self.lock();
        state.loading = loading;
        state.status = message.to_string();
    }

    fn show_alert(&self, level: AlertLevel, message: &str) {
        self.lock().alerts.push(Alert {
            level,
            message: message.to_string(),
        });
    }

    fn show_total(&self, total: u64) {
        // badge is hidden for zero
        self.lock().total = (total > 0).then_some(total);
    }

    fn render_books(&self, books: &[BookView]) {
        self.lock().books = books.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_loading_state() {
        let presenter = RecordingPresenter::new();
        presenter.set_loading(true, "Searching books by Tolkien...");
        presenter.show_alert(AlertLevel::Info, "old");
        presenter.show_total(12);
        presenter.reset();

        let state = presenter.snapshot();
        assert!(state.loading);
        assert!(state.alerts.is_empty());
        assert_eq!(state.total, None);
    }

    #[test]
    fn zero_total_hides_badge() {
        let presenter = RecordingPresenter::new();
        presenter.show_total(0);
        assert_eq!(presenter.snapshot().total, None);
    }
}
