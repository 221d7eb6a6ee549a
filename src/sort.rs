//! Client-side ordering of normalized results.
//!
//! Sorting is stable for every mode and books without a year always end up
//! last, whichever direction is requested.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::{BookView, SortMode};

pub fn sort(mut books: Vec<BookView>, mode: SortMode) -> Vec<BookView> {
    match mode {
        SortMode::YearAscending => books.sort_by(|a, b| compare_years(a.year, b.year, false)),
        SortMode::YearDescending => books.sort_by(|a, b| compare_years(a.year, b.year, true)),
        SortMode::TitleAscending => return sort_by_title(books, false),
        SortMode::TitleDescending => return sort_by_title(books, true),
        SortMode::Relevance => {}
    }
    books
}

fn compare_years(a: Option<i32>, b: Option<i32>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_by_title(books: Vec<BookView>, descending: bool) -> Vec<BookView> {
    let mut keyed: Vec<(CollationKey, BookView)> = books
        .into_iter()
        .map(|b| (CollationKey::new(&b.title), b))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| if descending { b.cmp(a) } else { a.cmp(b) });
    keyed.into_iter().map(|(_, book)| book).collect()
}

/// Multi-level key approximating a locale collation: base letters first,
/// then accents, then case.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    base: String,
    accented: String,
    original: String,
}

impl CollationKey {
    fn new(title: &str) -> Self {
        let base = title
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let accented = title.nfkd().flat_map(char::to_lowercase).collect();
        Self {
            base,
            accented,
            original: title.to_string(),
        }
    }
}
