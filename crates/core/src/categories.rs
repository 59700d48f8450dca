//! Category listing normalization
//!
//! The `/categories` endpoint returns the canonical server-side names plus an
//! alias table. The listing shown to users swaps `Misc` for its alias and
//! appends the local `Favorites` pseudo-category.

use serde::{Deserialize, Serialize};

/// Display name of the client-only category backed by local storage
pub const FAVORITES_CATEGORY: &str = "Favorites";

/// Server-side category that is displayed through its alias
pub const MISC_CATEGORY: &str = "Misc";

/// Alias entry from the `categoryAliases` array
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryAlias {
    pub alias: String,
    pub resolved: String,
}

impl CategoryAlias {
    pub fn new(alias: impl Into<String>, resolved: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            resolved: resolved.into(),
        }
    }
}

/// Build the display listing from the raw categories and their aliases
///
/// `Misc` is replaced by the alias of the first entry resolving to it, or kept
/// as-is when no such alias exists. Every other category passes through in
/// order and `Favorites` is appended last.
///
/// An empty input yields an empty listing: `Favorites` is only appended when
/// the server returned at least one category.
pub fn resolve_categories(categories: &[String], aliases: &[CategoryAlias]) -> Vec<String> {
    if categories.is_empty() {
        return Vec::new();
    }

    let mut listing: Vec<String> = categories
        .iter()
        .map(|category| {
            if category == MISC_CATEGORY {
                aliases
                    .iter()
                    .find(|a| a.resolved == MISC_CATEGORY)
                    .map(|a| a.alias.clone())
                    .unwrap_or_else(|| category.clone())
            } else {
                category.clone()
            }
        })
        .collect();

    listing.push(FAVORITES_CATEGORY.to_string());
    listing
}

/// Whether `name` designates the local favorites pseudo-category
pub fn is_favorites(name: &str) -> bool {
    name == FAVORITES_CATEGORY
}
