//! User-facing status strings and small display helpers.

use crate::domain::ValidationError;

pub const TOO_SHORT_MESSAGE: &str = "Please enter at least 2 characters to search.";
pub const INVALID_YEAR_MESSAGE: &str = "Year must be greater than or equal to 1000.";
pub const FAILURE_MESSAGE: &str =
    "Something went wrong while searching for books. Please try again later.";
pub const YEAR_NOT_AVAILABLE: &str = "Year not available";

pub fn validation_message(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::TooShort => TOO_SHORT_MESSAGE,
        ValidationError::InvalidYear => INVALID_YEAR_MESSAGE,
    }
}

pub fn loading_message(author: &str) -> String {
    format!("Searching books by {}...", author)
}

pub fn results_message(limit: u32, total: u64) -> String {
    format!(
        "Showing {} of {} results.",
        total.min(u64::from(limit)),
        format_count(total)
    )
}

pub fn no_results_message(author: &str) -> String {
    format!(
        "No books found for \"{}\". Try another name or check the spelling.",
        author
    )
}

pub fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| YEAR_NOT_AVAILABLE.to_string())
}

/// Groups digits by thousands: `1234567` -> `1,234,567`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Escapes text for insertion into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
