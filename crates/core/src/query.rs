//! Joke query construction
//!
//! Turns the filter selections of a fetch (blacklisted flags, amount, joke
//! types) into the query parameters of `GET /joke/{category}`.

use serde::Serialize;

use crate::joke::JokeType;

/// Amount requested when no usable amount was selected
pub const DEFAULT_AMOUNT: i32 = 4;

/// Query parameters for a joke fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JokeQuery {
    /// Comma-joined content flags to exclude, omitted when empty
    pub blacklist: Option<String>,
    pub amount: i32,
    /// Type filter, omitted when both types are wanted
    #[serde(rename = "type")]
    pub joke_type: Option<JokeType>,
}

impl JokeQuery {
    /// Query string pairs in the order they are sent
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("amount", self.amount.to_string())];

        if let Some(blacklist) = &self.blacklist {
            pairs.push(("blacklistFlags", blacklist.clone()));
        }
        if let Some(joke_type) = self.joke_type {
            pairs.push(("type", joke_type.as_str().to_string()));
        }

        pairs
    }
}

/// Build a [`JokeQuery`] from the user's selections
///
/// - `selected_flags` keep their selection order; repeated flags are sent once.
/// - `amount_label` falls back to [`DEFAULT_AMOUNT`] when absent or not an integer.
/// - Selecting both types, or neither, sends no type filter.
pub fn build_query<S: AsRef<str>>(
    selected_flags: &[S],
    amount_label: Option<&str>,
    single_selected: bool,
    twopart_selected: bool,
) -> JokeQuery {
    JokeQuery {
        blacklist: resolve_blacklist(selected_flags),
        amount: resolve_amount(amount_label),
        joke_type: resolve_type(single_selected, twopart_selected),
    }
}

fn resolve_blacklist<S: AsRef<str>>(selected_flags: &[S]) -> Option<String> {
    let mut flags: Vec<&str> = Vec::with_capacity(selected_flags.len());
    for flag in selected_flags {
        let flag = flag.as_ref();
        if !flags.contains(&flag) {
            flags.push(flag);
        }
    }

    if flags.is_empty() {
        None
    } else {
        Some(flags.join(","))
    }
}

fn resolve_amount(amount_label: Option<&str>) -> i32 {
    amount_label
        .and_then(|label| label.parse::<i32>().ok())
        .unwrap_or(DEFAULT_AMOUNT)
}

fn resolve_type(single_selected: bool, twopart_selected: bool) -> Option<JokeType> {
    match (single_selected, twopart_selected) {
        (true, false) => Some(JokeType::Single),
        (false, true) => Some(JokeType::TwoPart),
        // Both or neither: no filter, the server returns both types.
        _ => None,
    }
}
