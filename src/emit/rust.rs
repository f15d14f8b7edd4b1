//! Rust struct emitter

use super::types::{EmitOptions, Emitter};
use crate::error::{Error, Result};
use crate::resolver::{FieldType, TypeKind};
use crate::schema::{Schema, StructSchema};
use crate::template::{self, TemplateContext};
use std::collections::{HashMap, HashSet};

const HEADER: &str = "// Code generated by docshape. DO NOT EDIT.";
const SOURCE_LINE: &str = "// Source: {{ source }}";
const SERDE_IMPORT: &str = "use serde::{Deserialize, Serialize};";
const IMPORT: &str = "use {{ path }};";
const STRUCT_OPEN: &str = "/// Documents at `{{ struct.path }}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct {{ struct.name }} {";
const FIELD_RENAME: &str = "    #[serde(rename = \"{{ field.source }}\")]";
const FIELD: &str = "    pub {{ field.name }}: {{ field.type }},";

/// Emits serde-annotated Rust structs
#[derive(Debug, Clone, Default)]
pub struct RustEmitter;

impl RustEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }

    fn render_struct(&self, schema: &StructSchema) -> Result<Vec<String>> {
        let mut lines = Vec::new();

        let ctx = TemplateContext::new().with(
            "struct",
            serde_json::json!({ "name": schema.name, "path": schema.path }),
        );
        lines.extend(template::render(STRUCT_OPEN, &ctx)?.lines().map(String::from));

        for field in &schema.fields {
            let ctx = TemplateContext::new().with(
                "field",
                serde_json::json!({
                    "name": field.display_name,
                    "source": field.source_name.escape_default().to_string(),
                    "type": rust_type(&field.field_type),
                }),
            );
            if field.is_renamed() {
                lines.push(template::render(FIELD_RENAME, &ctx)?);
            }
            lines.push(template::render(FIELD, &ctx)?);
        }

        lines.push("}".to_string());
        Ok(lines)
    }
}

impl Emitter for RustEmitter {
    fn emit(&self, schema: &Schema, options: &EmitOptions) -> Result<String> {
        let mut body = vec![SERDE_IMPORT.to_string()];
        for path in schema.references() {
            let ctx = TemplateContext::new().with("path", path);
            body.push(template::render(IMPORT, &ctx)?);
        }

        for item in emission_order(schema, options.embed_structs) {
            body.push(String::new());
            body.extend(self.render_struct(item)?);
        }

        let mut out = vec![HEADER.to_string()];
        if let Some(source) = &options.source_label {
            let ctx = TemplateContext::new().with("source", source.as_str());
            out.push(template::render(SOURCE_LINE, &ctx)?);
        }
        out.push(String::new());

        match &options.module {
            Some(module) => {
                validate_module(module)?;
                out.push(format!("pub mod {module} {{"));
                out.extend(body.into_iter().map(|line| {
                    if line.is_empty() {
                        line
                    } else {
                        format!("    {line}")
                    }
                }));
                out.push("}".to_string());
            }
            None => out.extend(body),
        }

        let mut text = out.join("\n");
        text.push('\n');
        Ok(text)
    }
}

/// Rust spelling of a resolved type
pub fn rust_type(field_type: &FieldType) -> String {
    let inner = match &field_type.kind {
        TypeKind::Primitive { name, .. } | TypeKind::StructRef { name } => name.clone(),
        TypeKind::ArrayOf { element } => format!("Vec<{}>", rust_type(element)),
    };
    if field_type.nullable {
        format!("Option<{inner}>")
    } else {
        inner
    }
}

/// Struct order in the output
///
/// Breadth-first as built, or depth-first with each nested struct placed
/// right after the first struct that references it.
fn emission_order(schema: &Schema, embed: bool) -> Vec<&StructSchema> {
    if !embed {
        return schema.structs.iter().collect();
    }

    let by_name: HashMap<&str, &StructSchema> =
        schema.structs.iter().map(|s| (s.name.as_str(), s)).collect();
    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(schema.structs.len());
    for item in &schema.structs {
        visit_depth_first(item, &by_name, &mut visited, &mut order);
    }
    order
}

fn visit_depth_first<'a>(
    item: &'a StructSchema,
    by_name: &HashMap<&str, &'a StructSchema>,
    visited: &mut HashSet<&'a str>,
    order: &mut Vec<&'a StructSchema>,
) {
    if !visited.insert(item.name.as_str()) {
        return;
    }
    order.push(item);
    for name in item.referenced_structs() {
        if let Some(&child) = by_name.get(name) {
            visit_depth_first(child, by_name, visited, order);
        }
    }
}

fn validate_module(module: &str) -> Result<()> {
    let valid = !module.is_empty()
        && !module.starts_with(|c: char| c.is_ascii_digit())
        && module.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::emit(format!("'{module}' is not a valid module name")))
    }
}
