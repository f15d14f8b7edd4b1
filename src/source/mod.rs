//! Document sources
//!
//! Supports: JSON (files, stdin, JSON Lines, Extended JSON) and SQL tables
//! through DuckDB
//!
//! # Overview
//!
//! A source yields one document at a time until it reports end of input.
//! Sources are read once; they cannot be rewound.

mod database;
mod json;
mod types;

pub use database::{DatabaseKind, DatabaseSource};
pub use json::JsonSource;
pub use types::{DocumentSource, JsonSourceConfig, Limited};
