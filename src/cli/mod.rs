//! CLI module
//!
//! Command-line interface for generating structs.
//!
//! # Commands
//!
//! - `json` - Infer from a JSON file or stdin
//! - `database` - Infer from a sampled database table
//! - `collections` - List database tables

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
