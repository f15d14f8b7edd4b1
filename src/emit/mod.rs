//! Emitters
//!
//! Supports: Rust (serde structs), JSON Schema (draft-07), JSON
//!
//! # Overview
//!
//! An emitter turns the ordered struct list into source text. External
//! type references are gathered from every field, deduplicated and sorted
//! before emission.

mod json;
mod json_schema;
mod rust;
mod types;

pub use json::JsonEmitter;
pub use json_schema::{JsonSchema, JsonSchemaEmitter, JsonType, JsonTypeOrArray, SchemaProperty};
pub use rust::{rust_type, RustEmitter};
pub use types::{emitter_for, EmitOptions, Emitter, OutputFormat};
