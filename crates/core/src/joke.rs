//! Joke domain model
//!
//! JokeAPI describes both joke shapes with one flat object where `joke` is set
//! for single-part jokes and `setup`/`delivery` for two-part ones. [`Joke`]
//! keeps the payload in an enum instead so only one shape can exist, and
//! converts from and to the flat [`WireJoke`] through serde.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable JokeAPI joke identifier
pub type JokeId = u32;

/// Error converting a wire joke into the domain model
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JokeError {
    #[error("joke {id} has type single but no joke text")]
    MissingText { id: JokeId },

    #[error("joke {id} has type twopart but is missing its {field}")]
    MissingPart { id: JokeId, field: &'static str },

    #[error("unknown joke type: {0}")]
    UnknownType(String),

    #[error("unknown content flag: {0} (expected one of explicit, nsfw, political, racist, religious, sexist)")]
    UnknownFlag(String),
}

/// Joke type keyword as used by the API and the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JokeType {
    Single,
    TwoPart,
}

impl JokeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JokeType::Single => "single",
            JokeType::TwoPart => "twopart",
        }
    }
}

impl fmt::Display for JokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JokeType {
    type Err = JokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(JokeType::Single),
            "twopart" => Ok(JokeType::TwoPart),
            other => Err(JokeError::UnknownType(other.to_string())),
        }
    }
}

/// One of the six content-sensitivity markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFlag {
    Explicit,
    Nsfw,
    Political,
    Racist,
    Religious,
    Sexist,
}

impl ContentFlag {
    pub const ALL: [ContentFlag; 6] = [
        ContentFlag::Explicit,
        ContentFlag::Nsfw,
        ContentFlag::Political,
        ContentFlag::Racist,
        ContentFlag::Religious,
        ContentFlag::Sexist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFlag::Explicit => "explicit",
            ContentFlag::Nsfw => "nsfw",
            ContentFlag::Political => "political",
            ContentFlag::Racist => "racist",
            ContentFlag::Religious => "religious",
            ContentFlag::Sexist => "sexist",
        }
    }
}

impl std::str::FromStr for ContentFlag {
    type Err = JokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| JokeError::UnknownFlag(s.to_string()))
    }
}

impl AsRef<str> for ContentFlag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content flags attached to a joke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub explicit: bool,
    pub nsfw: bool,
    pub political: bool,
    pub racist: bool,
    pub religious: bool,
    pub sexist: bool,
}

impl Flags {
    pub fn is_set(&self, flag: ContentFlag) -> bool {
        match flag {
            ContentFlag::Explicit => self.explicit,
            ContentFlag::Nsfw => self.nsfw,
            ContentFlag::Political => self.political,
            ContentFlag::Racist => self.racist,
            ContentFlag::Religious => self.religious,
            ContentFlag::Sexist => self.sexist,
        }
    }

    /// True when none of the six flags is set
    pub fn is_clean(&self) -> bool {
        !ContentFlag::ALL.iter().any(|f| self.is_set(*f))
    }

    /// Flags that are set, in canonical order
    pub fn set_flags(&self) -> Vec<ContentFlag> {
        ContentFlag::ALL
            .into_iter()
            .filter(|f| self.is_set(*f))
            .collect()
    }
}

/// Joke content, shaped by the joke type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokePayload {
    Single { text: String },
    TwoPart { setup: String, delivery: String },
}

/// A joke as fetched from the API or read back from favorites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireJoke", into = "WireJoke")]
pub struct Joke {
    pub id: JokeId,
    pub category: String,
    pub lang: String,
    pub safe: bool,
    pub flags: Flags,
    pub payload: JokePayload,
}

impl Joke {
    pub fn joke_type(&self) -> JokeType {
        match self.payload {
            JokePayload::Single { .. } => JokeType::Single,
            JokePayload::TwoPart { .. } => JokeType::TwoPart,
        }
    }

    /// Text the short preview is cut from: the joke itself or its setup
    pub fn lead_text(&self) -> &str {
        match &self.payload {
            JokePayload::Single { text } => text,
            JokePayload::TwoPart { setup, .. } => setup,
        }
    }
}

/// Flat JokeAPI representation of a joke
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireJoke {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<String>,
    pub flags: Flags,
    pub id: JokeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joke: Option<String>,
    pub lang: String,
    pub safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(rename = "type")]
    pub joke_type: JokeType,
}

impl TryFrom<WireJoke> for Joke {
    type Error = JokeError;

    fn try_from(wire: WireJoke) -> Result<Self, Self::Error> {
        let payload = match wire.joke_type {
            JokeType::Single => JokePayload::Single {
                text: wire.joke.ok_or(JokeError::MissingText { id: wire.id })?,
            },
            JokeType::TwoPart => JokePayload::TwoPart {
                setup: wire.setup.ok_or(JokeError::MissingPart {
                    id: wire.id,
                    field: "setup",
                })?,
                delivery: wire.delivery.ok_or(JokeError::MissingPart {
                    id: wire.id,
                    field: "delivery",
                })?,
            },
        };

        Ok(Joke {
            id: wire.id,
            category: wire.category,
            lang: wire.lang,
            safe: wire.safe,
            flags: wire.flags,
            payload,
        })
    }
}

impl From<Joke> for WireJoke {
    fn from(joke: Joke) -> Self {
        let joke_type = joke.joke_type();
        let (text, setup, delivery) = match joke.payload {
            JokePayload::Single { text } => (Some(text), None, None),
            JokePayload::TwoPart { setup, delivery } => (None, Some(setup), Some(delivery)),
        };

        WireJoke {
            category: joke.category,
            delivery,
            flags: joke.flags,
            id: joke.id,
            joke: text,
            lang: joke.lang,
            safe: joke.safe,
            setup,
            joke_type,
        }
    }
}
