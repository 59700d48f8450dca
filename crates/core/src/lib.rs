//! Core library for jokes
//!
//! This crate implements the **Functional Core** of the jokes application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The jokes project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`jokes_core`** (this crate): Pure transformation functions with zero I/O
//! - **`jokes`**: HTTP, SQLite and terminal output (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`categories`]: Category listing normalization (aliases and the `Favorites` entry)
//! - [`query`]: Construction of `/joke/{category}` query parameters from user selections
//! - [`joke`]: The joke domain model and its JokeAPI wire shape
//! - [`response`]: JokeAPI response envelopes and their reduction into outcomes
//! - [`favorites`]: The boundary trait for local favorite storage
//! - [`display`]: Presentation helpers shared by every output format
//!
//! # Example Usage
//!
//! ```rust
//! use jokes_core::categories::{resolve_categories, CategoryAlias};
//! use jokes_core::query::build_query;
//!
//! let aliases = vec![CategoryAlias::new("Miscellaneous", "Misc")];
//! let listing = resolve_categories(&["Programming".to_string(), "Misc".to_string()], &aliases);
//! assert_eq!(listing, vec!["Programming", "Miscellaneous", "Favorites"]);
//!
//! let query = build_query(&["nsfw", "racist"], Some("10"), true, false);
//! assert_eq!(query.blacklist.as_deref(), Some("nsfw,racist"));
//! assert_eq!(query.amount, 10);
//! ```

pub mod categories;
pub mod display;
pub mod favorites;
pub mod joke;
pub mod query;
pub mod response;
