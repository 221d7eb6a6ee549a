use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::domain::{BookView, SearchInput, SortMode, ValidationError};
use crate::infrastructure::AppState;
use crate::openlibrary::{CoverSize, cover_url, detail_url};
use crate::query::{self, parse_year};
use crate::services::messages;
use crate::services::{
    Alert, AlertLevel, PresentationState, Presenter, RecordingPresenter, SearchOutcome,
};

/// Raw form fields, exactly as the page submits them.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub author: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookCard {
    #[serde(flatten)]
    pub book: BookView,
    pub year_label: String,
    pub cover_url: Option<String>,
    pub detail_url: Option<String>,
}

impl From<BookView> for BookCard {
    fn from(book: BookView) -> Self {
        Self {
            year_label: messages::year_label(book.year),
            cover_url: book.cover_id.map(|id| cover_url(id, CoverSize::Medium)),
            detail_url: book.isbn.as_deref().map(detail_url),
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub outcome: &'static str,
    pub status: String,
    pub alerts: Vec<Alert>,
    pub total: u64,
    pub books: Vec<BookCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl SearchResponse {
    fn new(outcome: &SearchOutcome, state: PresentationState) -> Self {
        Self {
            outcome: outcome.label(),
            status: state.status,
            alerts: state.alerts,
            total: state.total.unwrap_or(0),
            books: state.books.into_iter().map(BookCard::from).collect(),
            error_kind: match outcome {
                SearchOutcome::Failed(e) => Some(e.kind()),
                _ => None,
            },
        }
    }
}

fn parse_input(params: &SearchParams) -> Result<SearchInput, ValidationError> {
    let input = SearchInput::new(params.author.clone().unwrap_or_default());
    let years = parse_year(params.year_from.as_deref())
        .and_then(|from| parse_year(params.year_to.as_deref()).map(|to| (from, to)));
    match years {
        Ok((from, to)) => Ok(input.with_years(from, to)),
        // author errors take precedence over year errors
        Err(e) => Err(query::build(&input, SortMode::Relevance).err().unwrap_or(e)),
    }
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let sort_mode = params
        .sort
        .as_deref()
        .map(SortMode::parse)
        .unwrap_or_default();
    let presenter = RecordingPresenter::new();

    let outcome = match parse_input(&params) {
        Ok(input) => state.search.run(&input, sort_mode, &presenter).await,
        Err(e) => {
            tracing::warn!("Search rejected: {}", e);
            presenter.show_alert(AlertLevel::Warning, messages::validation_message(&e));
            SearchOutcome::Rejected(e)
        }
    };

    let status = match outcome {
        SearchOutcome::Found { .. } | SearchOutcome::NoResults => StatusCode::OK,
        SearchOutcome::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SearchOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(SearchResponse::new(&outcome, presenter.snapshot())),
    )
}
