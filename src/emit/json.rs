//! JSON emitter

use super::types::{EmitOptions, Emitter};
use crate::error::Result;
use crate::schema::Schema;

/// Emits the struct list and resolution report as pretty JSON
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }
}

impl Emitter for JsonEmitter {
    fn emit(&self, schema: &Schema, _options: &EmitOptions) -> Result<String> {
        let mut text = serde_json::to_string_pretty(schema)?;
        text.push('\n');
        Ok(text)
    }
}
