//! Document model
//!
//! Semi-structured documents as the inference engine sees them: ordered
//! maps of field name to value, where a value is a typed primitive, an
//! array, or a nested document.
//!
//! # Overview
//!
//! The document module provides:
//! - `Document` / `Value` - The in-memory document tree
//! - `PrimitiveKind` - The concrete kind of a primitive value
//! - Conversion from `serde_json::Value`, including MongoDB Extended JSON

mod extjson;
mod types;

pub use extjson::{document_from_json, value_from_json, ExtJsonOptions};
pub use types::{Document, PrimitiveKind, Value};

#[cfg(test)]
mod tests;
