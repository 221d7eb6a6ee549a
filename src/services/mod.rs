//! Services Layer
//!
//! This module contains the search pipeline extracted from HTTP handlers.
//! Services can be driven directly or through Axum handlers.

pub mod messages;
pub mod presenter;
pub mod search_service;
pub mod session;

// Re-export for convenience
pub use presenter::{Alert, AlertLevel, PresentationState, Presenter, RecordingPresenter};
pub use search_service::{SearchOutcome, SearchService};
pub use session::SearchSession;
