//! # docshape
//!
//! Infers named, typed struct definitions from a sample of schemaless
//! documents (JSON, MongoDB Extended JSON, or rows of a database table).
//!
//! ## Features
//!
//! - **Accumulation**: Per-path type counts in a mergeable tree
//! - **Sharding**: Accumulate disjoint shards in parallel and merge them
//! - **Nullability**: Fields absent or null in any document become optional
//! - **Fallbacks**: Ambiguous positions resolve to an opaque type and are
//!   reported instead of failing
//! - **Emitters**: Rust structs, JSON Schema, or the raw struct list
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docshape::emit::{EmitOptions, Emitter, RustEmitter};
//! use docshape::engine::{InferConfig, Inferrer};
//! use docshape::source::{JsonSource, JsonSourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> docshape::Result<()> {
//!     let mut source = JsonSource::open("orders.json", JsonSourceConfig::default())?;
//!     let mut inferrer = Inferrer::new(InferConfig::new().with_base_name("Order"));
//!     let schema = inferrer.infer(&mut source).await?;
//!
//!     print!("{}", RustEmitter::new().emit(&schema, &EmitOptions::default())?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────┐   ┌─────────────┐   ┌─────────┐
//! │ Source       │──▶│ Accumulator │──▶│ Resolver │──▶│ Schema      │──▶│ Emitter │
//! │ JSON / DuckDB│   │ (sharded,   │   │ FieldType│   │ Builder     │   │ Rust    │
//! │              │   │  merged)    │   │ fallback │   │ (BFS, names)│   │ Schema  │
//! └──────────────┘   └─────────────┘   └──────────┘   └─────────────┘   └─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Document model and Extended JSON decoding
pub mod document;

/// Document sources (JSON, databases)
pub mod source;

/// Per-path type accumulation
pub mod accumulator;

/// Field type resolution
pub mod resolver;

/// Struct and field naming
pub mod naming;

/// Schema building
pub mod schema;

/// Code and schema emitters
pub mod emit;

/// Inference engine
pub mod engine;

/// Generator configuration
pub mod config;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use accumulator::Accumulator;
pub use document::{Document, PrimitiveKind, Value};
pub use engine::{InferConfig, Inferrer};
pub use error::{Error, Result};
pub use schema::{Schema, SchemaBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
