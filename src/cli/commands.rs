//! CLI commands and argument parsing

use crate::emit::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate typed structs from sampled documents
#[derive(Parser, Debug)]
#[command(name = "docshape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base name of the root struct (defaults to the input file stem)
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Wrap the output in `pub mod <MODULE>`
    #[arg(short, long, global = true)]
    pub module: Option<String>,

    /// Emit nested structs right after their first user
    #[arg(long, global = true)]
    pub embed_structs: bool,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file; may contain {{ name }} and {{ extension }} (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Accumulate in N parallel shards
    #[arg(long, global = true)]
    pub shards: Option<usize>,

    /// Read at most N documents
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Path to the documents inside each top-level value (e.g. data.items or $.data[*])
    #[arg(long, global = true)]
    pub record_path: Option<String>,

    /// Treat `$oid`, `$date` and friends as ordinary fields
    #[arg(long, global = true)]
    pub no_extended_json: bool,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer from JSON documents (concatenated, JSON Lines or arrays)
    Json {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Infer from a sampled database table
    Database {
        /// Database URI (postgres://, mysql://, sqlite://, duckdb:// or a file path)
        #[arg(short, long)]
        uri: Option<String>,

        /// Table to sample
        #[arg(short, long)]
        collection: Option<String>,

        /// Rows to sample (0 = all)
        #[arg(long)]
        sample_size: Option<usize>,
    },

    /// List the tables of a database
    Collections {
        /// Database URI
        #[arg(short, long)]
        uri: Option<String>,
    },
}
