//! Favorite jokes storage boundary
//!
//! The core only defines the contract; the shell provides the SQLite
//! implementation. Finding a joke already stored, or missing on delete, is a
//! reported outcome and never an error.

use serde::Serialize;

use crate::joke::{Joke, JokeId};

/// Result of storing a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Result of removing a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Removed,
    NotFound,
}

/// Persistent set of favorite jokes keyed by joke id
///
/// Implementations serialize mutations internally; callers never need their
/// own locking.
pub trait FavoritesStore {
    type Error;

    fn insert(&self, joke: &Joke) -> Result<InsertOutcome, Self::Error>;

    fn delete(&self, id: JokeId) -> Result<DeleteOutcome, Self::Error>;

    /// All favorites, ordered by id
    fn list_all(&self) -> Result<Vec<Joke>, Self::Error>;

    fn get(&self, id: JokeId) -> Result<Option<Joke>, Self::Error>;
}

impl InsertOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            InsertOutcome::Inserted => "Saved to favorites",
            InsertOutcome::AlreadyPresent => "Already in favorites",
        }
    }
}

impl DeleteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Removed => "Deleted from favorites",
            DeleteOutcome::NotFound => "Not in favorites",
        }
    }
}
