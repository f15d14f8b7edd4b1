//! Emitter types and traits

use super::{JsonEmitter, JsonSchemaEmitter, RustEmitter};
use crate::error::Result;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};

/// Output format of the generated schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Rust structs with serde derives (default)
    #[default]
    Rust,
    /// JSON Schema draft-07
    JsonSchema,
    /// The struct list as JSON
    Json,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Rust => "rs",
            OutputFormat::JsonSchema => "schema.json",
            OutputFormat::Json => "json",
        }
    }
}

/// Options shared by every emitter
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Module (package) label wrapping the output
    pub module: Option<String>,
    /// Emit nested structs right after their first user instead of
    /// breadth-first
    pub embed_structs: bool,
    /// Where the documents came from, for the generated header
    pub source_label: Option<String>,
}

/// Turns a built schema into text
pub trait Emitter: Send + Sync {
    /// Render the schema
    fn emit(&self, schema: &Schema, options: &EmitOptions) -> Result<String>;
}

/// Emitter for an output format
pub fn emitter_for(format: OutputFormat) -> Box<dyn Emitter> {
    match format {
        OutputFormat::Rust => Box::new(RustEmitter::new()),
        OutputFormat::JsonSchema => Box::new(JsonSchemaEmitter::new()),
        OutputFormat::Json => Box::new(JsonEmitter::new()),
    }
}
