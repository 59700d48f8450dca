//! Presentation helpers
//!
//! Text shared by the table, list and detail outputs: the word-limited
//! preview, category badges, joke titles and the amount notice.

use chrono::{DateTime, Utc};

use crate::joke::Joke;

/// Number of words kept in a joke preview
pub const PREVIEW_WORDS: usize = 2;

/// Short list preview: the first two words of the joke (or setup) and `...`
pub fn preview(joke: &Joke) -> String {
    format!(
        "{}...",
        substring_before_nth(joke.lead_text(), ' ', PREVIEW_WORDS)
    )
}

/// Text before the `n`th occurrence of `delimiter`, or the whole text
/// when it contains fewer occurrences
pub fn substring_before_nth(text: &str, delimiter: char, n: usize) -> &str {
    if n == 0 {
        return text;
    }

    match text.match_indices(delimiter).nth(n - 1) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Two-letter badge shown next to a category or joke
pub fn abbreviation(category: &str) -> String {
    category.chars().take(2).collect()
}

/// Joke heading, e.g. `Programming: Joke 12`
pub fn title(joke: &Joke) -> String {
    format!("{}: Joke {}", joke.category, joke.id)
}

/// Notice shown when the server returned another number of jokes than requested
pub fn amount_notice(requested: i32, received: usize) -> Option<String> {
    if i64::from(requested) == received as i64 {
        None
    } else {
        Some(format!("Received {received} jokes"))
    }
}

/// Convert a JokeAPI millisecond timestamp to a formatted string
pub fn format_timestamp_ms(timestamp: Option<i64>) -> Option<String> {
    timestamp.and_then(|ts| {
        let dt = DateTime::<Utc>::from_timestamp_millis(ts)?;
        Some(dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    })
}
