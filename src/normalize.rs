//! Result normalizer
//!
//! Maps raw search documents to [`BookView`]s. Total: every record, however
//! malformed, yields exactly one view, in input order.

use serde_json::Value;

use crate::domain::{BookView, CoverId, RawRecord};

/// Defaults substituted for missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefaults {
    pub title: &'static str,
    pub authors: &'static str,
}

pub const DEFAULTS: FieldDefaults = FieldDefaults {
    title: "Unknown title",
    authors: "Unknown author",
};

impl Default for FieldDefaults {
    fn default() -> Self {
        DEFAULTS
    }
}

pub fn normalize(records: &[RawRecord]) -> Vec<BookView> {
    normalize_with(records, &DEFAULTS)
}

pub fn normalize_with(records: &[RawRecord], defaults: &FieldDefaults) -> Vec<BookView> {
    records.iter().map(|r| normalize_record(r, defaults)).collect()
}

pub fn normalize_record(record: &RawRecord, defaults: &FieldDefaults) -> BookView {
    let title = record
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(defaults.title)
        .to_string();

    let names: Vec<&str> = string_list(record.get("author_name"))
        .filter(|n| !n.trim().is_empty())
        .collect();
    let authors = if names.is_empty() {
        defaults.authors.to_string()
    } else {
        names.join(", ")
    };

    BookView {
        title,
        authors,
        year: record.get("first_publish_year").and_then(integer_value),
        cover_id: record
            .get("cover_i")
            .and_then(integer_value)
            .map(CoverId),
        isbn: record
            .get("isbn")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

fn string_list(value: Option<&Value>) -> impl Iterator<Item = &str> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// Integers, integral floats and numeric strings; anything else is absent.
fn integer_value<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    let n = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    T::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from(value)
    }

    #[test]
    fn maps_complete_record() {
        let view = normalize_record(
            &record(json!({
                "title": "The Hobbit",
                "author_name": ["J.R.R. Tolkien", "Christopher Tolkien"],
                "first_publish_year": 1937,
                "isbn": ["9780547928227", "0547928220"],
                "cover_i": 14627509
            })),
            &DEFAULTS,
        );
        assert_eq!(
            view,
            BookView {
                title: "The Hobbit".into(),
                authors: "J.R.R. Tolkien, Christopher Tolkien".into(),
                year: Some(1937),
                cover_id: Some(CoverId(14627509)),
                isbn: Some("9780547928227".into()),
            }
        );
    }

    #[test]
    fn empty_record_gets_sentinels() {
        let view = normalize_record(&RawRecord::default(), &DEFAULTS);
        assert_eq!(view.title, "Unknown title");
        assert_eq!(view.authors, "Unknown author");
        assert_eq!(view.year, None);
        assert_eq!(view.cover_id, None);
        assert_eq!(view.isbn, None);
    }

    #[test]
    fn wrong_types_fall_back() {
        let view = normalize_record(
            &record(json!({
                "title": 42,
                "author_name": "not a list",
                "first_publish_year": "nineteen",
                "isbn": [],
                "cover_i": {"id": 1}
            })),
            &DEFAULTS,
        );
        assert_eq!(view.title, "Unknown title");
        assert_eq!(view.authors, "Unknown author");
        assert_eq!(view.year, None);
        assert_eq!(view.isbn, None);
        assert_eq!(view.cover_id, None);
    }

    #[test]
    fn present_title_is_kept_verbatim() {
        let view = normalize_record(&record(json!({ "title": "  The Hobbit " })), &DEFAULTS);
        assert_eq!(view.title, "  The Hobbit ");
    }

    #[test]
    fn lenient_numbers_and_mixed_lists() {
        let view = normalize_record(
            &record(json!({
                "title": "   ",
                "author_name": [7, "Ursula K. Le Guin", null],
                "first_publish_year": "1969",
                "isbn": [123, "x"],
                "cover_i": 55.0
            })),
            &DEFAULTS,
        );
        assert_eq!(view.title, "Unknown title");
        assert_eq!(view.authors, "Ursula K. Le Guin");
        assert_eq!(view.year, Some(1969));
        assert_eq!(view.isbn, None);
        assert_eq!(view.cover_id, Some(CoverId(55)));
    }

    #[test]
    fn year_out_of_range_is_absent() {
        let view = normalize_record(&record(json!({ "first_publish_year": 1e12 })), &DEFAULTS);
        assert_eq!(view.year, None);
    }

    #[test]
    fn one_to_one_in_order() {
        let records = vec![
            record(json!({ "title": "B" })),
            record(json!(null)),
            record(json!({ "title": "A" })),
        ];
        let titles: Vec<_> = normalize(&records).into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["B", "Unknown title", "A"]);
    }

    #[test]
    fn custom_defaults_are_applied() {
        let defaults = FieldDefaults {
            title: "?",
            authors: "anon",
        };
        let books = normalize_with(&[RawRecord::default()], &defaults);
        assert_eq!(books[0].title, "?");
        assert_eq!(books[0].authors, "anon");
    }
}
