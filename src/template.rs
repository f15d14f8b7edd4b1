//! Template rendering for generated source text
//!
//! Handles `{{ variable }}` interpolation in the emitter's code templates
//! and in output paths.
//! Supports nested access like `{{ struct.name }}` and `{{ field.type }}`.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}").unwrap()
});

/// Variables available to a template
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: Map<String, Value>,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Builder-style `set`
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a value by path (e.g., "struct.name")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.vars.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

/// Render a template string with the given context
///
/// Substitution is a single pass: rendered values are never re-scanned for
/// placeholders.
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = TEMPLATE_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let var_path = &cap[1];
        match ctx.get(var_path) {
            Some(value) => value_to_string(value),
            None => {
                missing.push(var_path.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Check if a string contains template variables
pub fn has_templates(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // For complex types, use JSON serialization
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_substitution() {
        let ctx = TemplateContext::new().with("name", "Order");

        let result = render("pub struct {{ name }} {", &ctx).unwrap();
        assert_eq!(result, "pub struct Order {");
    }

    #[test]
    fn test_nested_value() {
        let ctx = TemplateContext::new().with(
            "field",
            json!({"name": "created_at", "type": "Option<DateTime>"}),
        );

        let result = render("pub {{ field.name }}: {{ field.type }},", &ctx).unwrap();
        assert_eq!(result, "pub created_at: Option<DateTime>,");
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = TemplateContext::new();
        let err = render("{{ struct.missing }}", &ctx).unwrap_err();
        assert!(err.to_string().contains("struct.missing"));
    }

    #[test]
    fn test_rendered_values_are_not_rescanned() {
        let ctx = TemplateContext::new()
            .with("source", "{{ other }}")
            .with("other", "boom");

        let result = render("rename = \"{{ source }}\"", &ctx).unwrap();
        assert_eq!(result, "rename = \"{{ other }}\"");
    }

    #[test]
    fn test_number_and_bool_substitution() {
        let ctx = TemplateContext::new().with("count", 3).with("embedded", true);

        let result = render("count={{ count }} embedded={{ embedded }}", &ctx).unwrap();
        assert_eq!(result, "count=3 embedded=true");
    }

    #[test]
    fn test_whitespace_in_template() {
        let ctx = TemplateContext::new().with("key", "value");

        assert_eq!(render("{{key}}", &ctx).unwrap(), "value");
        assert_eq!(render("{{ key }}", &ctx).unwrap(), "value");
        assert_eq!(render("{{  key  }}", &ctx).unwrap(), "value");
    }

    #[test]
    fn test_has_templates() {
        assert!(has_templates("{{ name }}"));
        assert!(has_templates("prefix {{ var.path }} suffix"));
        assert!(!has_templates("no templates here"));
        assert!(!has_templates("{ not a template }"));
    }
}
