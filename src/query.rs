//! Query builder
//!
//! Turns a form submission into a validated [`SearchQuery`]. Pure: no I/O.

use crate::domain::{Clause, SearchInput, SearchQuery, SortMode, ValidationError};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MIN_AUTHOR_CHARS: usize = 2;
pub const MIN_YEAR: i32 = 1000;
/// Upper sentinel for a range with only a lower bound
pub const OPEN_UPPER_YEAR: i32 = 3000;

pub const SEARCH_FIELDS: &[&str] = &[
    "title",
    "author_name",
    "first_publish_year",
    "isbn",
    "cover_i",
];

pub fn build(input: &SearchInput, sort_mode: SortMode) -> Result<SearchQuery, ValidationError> {
    let author = input.author_text.trim();
    if author.chars().count() < MIN_AUTHOR_CHARS {
        return Err(ValidationError::TooShort);
    }

    let (from, to) = normalize_years(input.year_from, input.year_to)?;

    let mut clauses = vec![Clause::PhraseMatch {
        field: "author",
        value: author.to_string(),
    }];
    if let Some(range) = year_clause(from, to) {
        clauses.push(range);
    }

    Ok(SearchQuery {
        author: author.to_string(),
        clauses,
        limit: DEFAULT_LIMIT,
        fields: SEARCH_FIELDS,
        sort_mode,
    })
}

/// Parses a year form field. Blank means absent.
pub fn parse_year(raw: Option<&str>) -> Result<Option<i32>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidYear),
    }
}

fn normalize_years(
    from: Option<i32>,
    to: Option<i32>,
) -> Result<(Option<i32>, Option<i32>), ValidationError> {
    if from.into_iter().chain(to).any(|y| y < MIN_YEAR) {
        return Err(ValidationError::InvalidYear);
    }
    match (from, to) {
        (Some(f), Some(t)) if f > t => Ok((Some(t), Some(f))),
        pair => Ok(pair),
    }
}

fn year_clause(from: Option<i32>, to: Option<i32>) -> Option<Clause> {
    let (low, high) = match (from, to) {
        (Some(low), Some(high)) => (low, high),
        (Some(low), None) => (low, OPEN_UPPER_YEAR),
        (None, Some(high)) => (MIN_YEAR, high),
        (None, None) => return None,
    };
    Some(Clause::YearRange { low, high })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_for(input: SearchInput) -> String {
        build(&input, SortMode::Relevance)
            .expect("valid input")
            .query_string()
    }

    #[test]
    fn rejects_short_author_text() {
        for text in ["", " ", "a", "  b  ", "\u{e9}"] {
            assert_eq!(
                build(&SearchInput::new(text), SortMode::Relevance),
                Err(ValidationError::TooShort),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(build(&SearchInput::new("\u{e9}\u{e8}"), SortMode::Relevance).is_ok());
    }

    #[test]
    fn rejects_years_below_minimum() {
        let cases = [(Some(999), None), (None, Some(10)), (Some(2000), Some(0))];
        for (from, to) in cases {
            let input = SearchInput::new("Tolkien").with_years(from, to);
            assert_eq!(
                build(&input, SortMode::Relevance),
                Err(ValidationError::InvalidYear)
            );
        }
    }

    #[test]
    fn short_author_is_reported_before_bad_year() {
        let input = SearchInput::new("x").with_years(Some(5), None);
        assert_eq!(
            build(&input, SortMode::Relevance),
            Err(ValidationError::TooShort)
        );
    }

    #[test]
    fn author_only_query() {
        let query = build(&SearchInput::new("  Tolkien "), SortMode::Relevance).unwrap();
        assert_eq!(query.query_string(), r#"author:"Tolkien""#);
        assert_eq!(query.limit, 10);
        assert_eq!(
            query.fields_param(),
            "title,author_name,first_publish_year,isbn,cover_i"
        );
        assert_eq!(query.author, "Tolkien");
    }

    #[test]
    fn swaps_inverted_bounds() {
        let input = SearchInput::new("Tolkien").with_years(Some(2000), Some(1950));
        assert_eq!(
            query_for(input),
            r#"author:"Tolkien" AND first_publish_year:[1950 TO 2000]"#
        );
    }

    #[test]
    fn open_ended_ranges_use_sentinels() {
        let from_only = SearchInput::new("Tolkien").with_years(Some(1960), None);
        assert!(query_for(from_only).ends_with("first_publish_year:[1960 TO 3000]"));

        let to_only = SearchInput::new("Tolkien").with_years(None, Some(1940));
        assert!(query_for(to_only).ends_with("first_publish_year:[1000 TO 1940]"));
    }

    #[test]
    fn equal_bounds_are_kept() {
        let input = SearchInput::new("Tolkien").with_years(Some(1954), Some(1954));
        assert!(query_for(input).ends_with("[1954 TO 1954]"));
    }

    #[test]
    fn escapes_embedded_quotes() {
        let query = query_for(SearchInput::new(r#"Foo "Bar""#));
        assert_eq!(query, r#"author:"Foo \"Bar\"""#);
        // every quote inside the phrase is preceded by a backslash
        let inner = &query["author:\"".len()..query.len() - 1];
        let bytes = inner.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'"' {
                assert_eq!(bytes[i - 1], b'\\');
            }
        }
    }

    #[test]
    fn trailing_backslash_cannot_close_phrase() {
        assert_eq!(query_for(SearchInput::new(r"Foo\")), r#"author:"Foo\\""#);
    }

    #[test]
    fn params_carry_projection_and_limit() {
        let query = build(&SearchInput::new("Le Guin"), SortMode::YearAscending).unwrap();
        let params = query.params();
        assert_eq!(params[0], ("q", r#"author:"Le Guin""#.to_string()));
        assert_eq!(params[1], ("limit", "10".to_string()));
        assert_eq!(params[2].0, "fields");
        assert_eq!(query.sort_mode, SortMode::YearAscending);
    }

    #[test]
    fn parses_year_fields() {
        assert_eq!(parse_year(None), Ok(None));
        assert_eq!(parse_year(Some("   ")), Ok(None));
        assert_eq!(parse_year(Some(" 1999 ")), Ok(Some(1999)));
        assert_eq!(parse_year(Some("19x9")), Err(ValidationError::InvalidYear));
    }
}
