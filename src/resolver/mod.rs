//! Type resolution
//!
//! Turns one accumulator node into a single concrete `FieldType`.
//!
//! # Rules
//!
//! - **Nullability**: an explicit null was seen, or the position was absent
//!   from some of the documents that could have held it
//! - **Arrays**: element nullability is judged against element occurrences
//! - **Heterogeneous fields**: no union types; several candidates resolve to
//!   the opaque fallback type and are reported as a diagnostic

mod resolve;
mod types;

pub use resolve::{Resolution, Resolver};
pub use types::{Fallback, FallbackReason, FieldType, TypeKind};

#[cfg(test)]
mod tests;
