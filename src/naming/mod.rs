//! Naming policy
//!
//! Deterministic string transforms that turn document paths and field
//! names into identifiers for generated code.
//!
//! The schema builder only talks to the [`NamePolicy`] trait, so callers
//! can supply their own conventions. [`RustNamePolicy`] is the default:
//! `UpperCamelCase` structs and `snake_case` fields, with Rust keywords
//! escaped.

mod inflect;
mod policy;

pub use inflect::{pluralize_word, singularize_word};
pub use policy::{NamePolicy, RustNamePolicy};

#[cfg(test)]
mod tests;
