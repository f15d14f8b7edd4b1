//! Generator configuration
//!
//! Settings for a generation run, loadable from a YAML file. Every key is
//! optional and command-line flags take precedence over file values.
//!
//! ```yaml
//! name: Order
//! module: models
//! format: rust
//! output: "generated/{{ name }}.{{ extension }}"
//! shards: 4
//! record_path: data.items
//! ```

use crate::emit::{EmitOptions, OutputFormat};
use crate::engine::InferConfig;
use crate::error::{Error, Result};
use crate::source::JsonSourceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default struct name when nothing better is known
pub const DEFAULT_NAME: &str = "AutoGenerated";

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root struct base name
    pub name: Option<String>,

    /// Module wrapping the generated code
    pub module: Option<String>,

    /// Place nested structs right after their first user
    pub embed_structs: bool,

    /// Output format
    pub format: OutputFormat,

    /// Output file (stdout when absent); may contain `{{ name }}` and
    /// `{{ extension }}`
    pub output: Option<String>,

    /// Parallel accumulation shards
    pub shards: usize,

    /// Read at most this many documents
    pub limit: Option<usize>,

    /// Path to the documents inside each top-level JSON value
    pub record_path: Option<String>,

    /// Decode MongoDB Extended JSON wrappers
    pub extended_json: bool,

    /// Yield the elements of top-level JSON arrays
    pub unwrap_arrays: bool,

    /// Database URI
    pub uri: Option<String>,

    /// Database table to sample
    pub collection: Option<String>,

    /// Rows to sample from the table (0 = all)
    pub sample_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: None,
            module: None,
            embed_structs: false,
            format: OutputFormat::default(),
            output: None,
            shards: 1,
            limit: None,
            record_path: None,
            extended_json: true,
            unwrap_arrays: true,
            uri: None,
            collection: None,
            sample_size: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML configuration
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(Error::config("name cannot be empty"));
        }
        if self.shards == 0 {
            return Err(Error::config("shards must be at least 1"));
        }
        if self.limit == Some(0) {
            return Err(Error::config("limit must be at least 1"));
        }
        if self.record_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(Error::config("record_path cannot be empty"));
        }
        if self.output.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(Error::config("output cannot be empty"));
        }
        Ok(())
    }

    /// Base name, falling back to `fallback` and then the default
    pub fn base_name(&self, fallback: Option<&str>) -> String {
        self.name
            .as_deref()
            .or(fallback)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_NAME)
            .to_string()
    }

    /// JSON reader settings
    pub fn json_source_config(&self) -> JsonSourceConfig {
        let config = JsonSourceConfig::default()
            .with_extended_json(self.extended_json)
            .with_unwrap_arrays(self.unwrap_arrays);
        match &self.record_path {
            Some(path) => config.with_record_path(path.clone()),
            None => config,
        }
    }

    /// Engine settings
    pub fn infer_config(&self, base_name: impl Into<String>) -> InferConfig {
        InferConfig::new()
            .with_base_name(base_name)
            .with_shards(self.shards)
    }

    /// Emitter settings
    pub fn emit_options(&self, source_label: Option<String>) -> EmitOptions {
        EmitOptions {
            module: self.module.clone(),
            embed_structs: self.embed_structs,
            source_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_yaml("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.shards, 1);
        assert!(config.extended_json);
        assert_eq!(config.format, OutputFormat::Rust);
        assert_eq!(config.sample_size, 1000);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
name: Order
module: models
embed_structs: true
format: json-schema
output: "out/{{ name }}.{{ extension }}"
shards: 4
limit: 500
record_path: data.items
extended_json: false
uri: "sqlite:///tmp/shop.db"
collection: orders
sample_size: 0
"#;
        let config = GeneratorConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.name.as_deref(), Some("Order"));
        assert_eq!(config.format, OutputFormat::JsonSchema);
        assert!(config.embed_structs);
        assert_eq!(config.shards, 4);
        assert_eq!(config.limit, Some(500));
        assert!(!config.extended_json);
        assert_eq!(config.collection.as_deref(), Some("orders"));
        assert_eq!(config.sample_size, 0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GeneratorConfig::from_yaml("nmae: Order").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("nmae"));
    }

    #[test]
    fn test_validation_errors() {
        for yaml in ["shards: 0", "limit: 0", "name: ''", "record_path: ' '"] {
            let err = GeneratorConfig::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{yaml}");
        }
    }

    #[test]
    fn test_base_name_fallbacks() {
        let mut config = GeneratorConfig::default();
        assert_eq!(config.base_name(None), "AutoGenerated");
        assert_eq!(config.base_name(Some("orders")), "orders");

        config.name = Some("Customer".to_string());
        assert_eq!(config.base_name(Some("orders")), "Customer");
    }

    #[test]
    fn test_derived_settings() {
        let config = GeneratorConfig {
            shards: 3,
            module: Some("models".to_string()),
            record_path: Some("items".to_string()),
            extended_json: false,
            ..Default::default()
        };

        let infer = config.infer_config("Order");
        assert_eq!(infer.base_name, "Order");
        assert_eq!(infer.shards, 3);

        let source = config.json_source_config();
        assert_eq!(source.record_path.as_deref(), Some("items"));
        assert!(!source.ext_json.extended);

        let emit = config.emit_options(Some("orders.json".to_string()));
        assert_eq!(emit.module.as_deref(), Some("models"));
        assert_eq!(emit.source_label.as_deref(), Some("orders.json"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: Event\nshards: 2").unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name.as_deref(), Some("Event"));
        assert_eq!(config.shards, 2);

        let err = GeneratorConfig::from_file("/nonexistent/docshape.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
