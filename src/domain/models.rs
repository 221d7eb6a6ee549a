//! Search data model
//!
//! Every entity here is created fresh for one search and dropped when the
//! next one starts.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Raw form submission, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub author_text: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

impl SearchInput {
    pub fn new(author_text: impl Into<String>) -> Self {
        Self {
            author_text: author_text.into(),
            ..Default::default()
        }
    }

    pub fn with_years(mut self, year_from: Option<i32>, year_to: Option<i32>) -> Self {
        self.year_from = year_from;
        self.year_to = year_to;
        self
    }
}

/// Client-side ordering selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep the search engine's own order
    #[default]
    Relevance,
    YearAscending,
    YearDescending,
    TitleAscending,
    TitleDescending,
}

impl SortMode {
    /// Unrecognized values fall back to `Relevance`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "year_asc" | "year_ascending" => SortMode::YearAscending,
            "year_desc" | "year_descending" => SortMode::YearDescending,
            "title_asc" | "title_ascending" => SortMode::TitleAscending,
            "title_desc" | "title_descending" => SortMode::TitleDescending,
            _ => SortMode::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::YearAscending => "year_asc",
            SortMode::YearDescending => "year_desc",
            SortMode::TitleAscending => "title_asc",
            SortMode::TitleDescending => "title_desc",
        }
    }
}

impl From<&str> for SortMode {
    fn from(value: &str) -> Self {
        SortMode::parse(value)
    }
}

impl From<String> for SortMode {
    fn from(value: String) -> Self {
        SortMode::parse(&value)
    }
}

/// A single predicate of the composed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    PhraseMatch { field: &'static str, value: String },
    YearRange { low: i32, high: i32 },
}

impl Clause {
    pub const YEAR_FIELD: &'static str = "first_publish_year";
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::PhraseMatch { field, value } => {
                f.write_str(field)?;
                f.write_str(":\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
            Clause::YearRange { low, high } => {
                write!(f, "{}:[{} TO {}]", Clause::YEAR_FIELD, low, high)
            }
        }
    }
}

/// Validated query, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub author: String,
    pub clauses: Vec<Clause>,
    pub limit: u32,
    pub fields: &'static [&'static str],
    pub sort_mode: SortMode,
}

impl SearchQuery {
    pub const CONJUNCTION: &'static str = " AND ";

    /// The `q` parameter sent to the search endpoint.
    pub fn query_string(&self) -> String {
        self.clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(Self::CONJUNCTION)
    }

    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }

    /// Query parameters in the order the endpoint receives them.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("q", self.query_string()),
            ("limit", self.limit.to_string()),
            ("fields", self.fields_param()),
        ]
    }
}

/// One untrusted document from the search response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawRecord(map),
            _ => RawRecord::default(),
        }
    }
}

/// Parsed search response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload {
    pub num_found: u64,
    pub docs: Vec<RawRecord>,
}

impl From<Value> for RawPayload {
    fn from(mut value: Value) -> Self {
        let num_found = value.get("numFound").and_then(count_value).unwrap_or(0);
        let docs = match value.get_mut("docs").map(Value::take) {
            Some(Value::Array(items)) => items.into_iter().map(RawRecord::from).collect(),
            _ => Vec::new(),
        };
        RawPayload { num_found, docs }
    }
}

fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Cover image identifier on the covers endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoverId(pub i64);

impl fmt::Display for CoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized book, the only shape presentation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookView {
    pub title: String,
    pub authors: String,
    pub year: Option<i32>,
    pub cover_id: Option<CoverId>,
    pub isbn: Option<String>,
}
