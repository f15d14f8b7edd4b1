//! Schema building
//!
//! Walks a finished accumulator breadth-first and produces the ordered list
//! of named struct definitions.
//!
//! # Output
//!
//! - **Ordering**: root struct first, nested structs in breadth-first order
//! - **Naming**: struct names come from the name policy; collisions get a
//!   numeric suffix
//! - **Fields**: sorted by display name, ties broken by source name
//! - **Report**: every fallback resolution taken along the way

mod builder;
mod types;

pub use builder::SchemaBuilder;
pub use types::{FieldSchema, ResolutionReport, Schema, StructSchema};

#[cfg(test)]
mod tests;
