//! Type accumulation
//!
//! Builds a tree of per-path observation counters from documents.
//!
//! # Features
//!
//! - **Incremental**: One `include_document` call per input document
//! - **Mergeable**: Independently built trees combine with `merge`, which is
//!   associative and commutative, so sharded accumulation is safe
//! - **Bounded**: Memory grows with distinct paths and kinds, not documents

mod accumulate;

pub use accumulate::Accumulator;
