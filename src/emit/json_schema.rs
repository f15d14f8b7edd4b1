//! JSON Schema emitter

use super::types::{EmitOptions, Emitter};
use crate::document::PrimitiveKind;
use crate::error::Result;
use crate::resolver::{FieldType, TypeKind};
use crate::schema::{Schema, StructSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonType::String => write!(f, "string"),
            JsonType::Number => write!(f, "number"),
            JsonType::Integer => write!(f, "integer"),
            JsonType::Boolean => write!(f, "boolean"),
            JsonType::Object => write!(f, "object"),
            JsonType::Array => write!(f, "array"),
            JsonType::Null => write!(f, "null"),
        }
    }
}

/// JSON type can be a single type or array of types (for nullable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    /// Create a single type, or `[type, "null"]` when nullable
    pub fn new(t: JsonType, nullable: bool) -> Self {
        if nullable && t != JsonType::Null {
            JsonTypeOrArray::Multiple(vec![t, JsonType::Null])
        } else {
            JsonTypeOrArray::Single(t)
        }
    }

    /// Check if this type is nullable
    pub fn is_nullable(&self) -> bool {
        match self {
            JsonTypeOrArray::Single(t) => *t == JsonType::Null,
            JsonTypeOrArray::Multiple(types) => types.contains(&JsonType::Null),
        }
    }
}

/// JSON Schema property definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    /// Property type(s); absent means any value
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub json_type: Option<JsonTypeOrArray>,

    /// Reference to a definition
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Alternatives (a nullable reference)
    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaProperty>>,

    /// Format hint (e.g., "date-time", "byte")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Nested properties (for objects)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaProperty>>,

    /// Required properties (for objects)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Additional properties allowed (for objects)
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    /// Array items schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
}

impl SchemaProperty {
    /// Create a property with the given type
    pub fn typed(json_type: JsonType, nullable: bool) -> Self {
        Self {
            json_type: Some(JsonTypeOrArray::new(json_type, nullable)),
            ..Default::default()
        }
    }

    /// Create a reference to a definition
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/definitions/{name}")),
            ..Default::default()
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Check if nullable
    pub fn is_nullable(&self) -> bool {
        self.json_type
            .as_ref()
            .is_some_and(JsonTypeOrArray::is_nullable)
            || self.any_of.as_ref().is_some_and(|alternatives| {
                alternatives
                    .iter()
                    .any(|alt| alt.json_type == Some(JsonTypeOrArray::Single(JsonType::Null)))
            })
    }
}

/// Full JSON Schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema version
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Schema title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// The root object
    #[serde(flatten)]
    pub root: SchemaProperty,

    /// Nested struct definitions
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, SchemaProperty>,
}

impl JsonSchema {
    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Emits a draft-07 JSON Schema
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaEmitter;

impl JsonSchemaEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }

    /// Build the schema document
    pub fn to_schema(&self, schema: &Schema) -> JsonSchema {
        let mut structs = schema.structs.iter();
        let root = structs.next();

        JsonSchema {
            schema: Some("http://json-schema.org/draft-07/schema#".to_string()),
            title: root.map(|s| s.name.clone()),
            root: root.map(object_property).unwrap_or_default(),
            definitions: structs
                .map(|s| (s.name.clone(), object_property(s)))
                .collect(),
        }
    }
}

impl Emitter for JsonSchemaEmitter {
    fn emit(&self, schema: &Schema, _options: &EmitOptions) -> Result<String> {
        let mut text = self.to_schema(schema).to_json_pretty()?;
        text.push('\n');
        Ok(text)
    }
}

fn object_property(item: &StructSchema) -> SchemaProperty {
    let properties = item
        .fields
        .iter()
        .map(|f| (f.source_name.clone(), field_property(&f.field_type)))
        .collect();
    let required = item
        .fields
        .iter()
        .filter(|f| !f.field_type.nullable)
        .map(|f| f.source_name.clone())
        .collect();

    SchemaProperty {
        properties: Some(properties),
        required,
        additional_properties: Some(true),
        ..SchemaProperty::typed(JsonType::Object, false)
    }
}

fn field_property(field_type: &FieldType) -> SchemaProperty {
    let nullable = field_type.nullable;
    match &field_type.kind {
        TypeKind::Primitive { primitive, .. } => primitive_property(*primitive, nullable),
        TypeKind::StructRef { name } if nullable => SchemaProperty {
            any_of: Some(vec![
                SchemaProperty::reference(name),
                SchemaProperty::typed(JsonType::Null, false),
            ]),
            ..Default::default()
        },
        TypeKind::StructRef { name } => SchemaProperty::reference(name),
        TypeKind::ArrayOf { element } => SchemaProperty {
            items: Some(Box::new(field_property(element))),
            ..SchemaProperty::typed(JsonType::Array, nullable)
        },
    }
}

fn primitive_property(kind: PrimitiveKind, nullable: bool) -> SchemaProperty {
    match kind {
        PrimitiveKind::Boolean => SchemaProperty::typed(JsonType::Boolean, nullable),
        PrimitiveKind::Int32 | PrimitiveKind::Int64 | PrimitiveKind::Timestamp => {
            SchemaProperty::typed(JsonType::Integer, nullable)
        }
        PrimitiveKind::Double => SchemaProperty::typed(JsonType::Number, nullable),
        PrimitiveKind::String => SchemaProperty::typed(JsonType::String, nullable),
        PrimitiveKind::Binary => {
            SchemaProperty::typed(JsonType::String, nullable).with_format("byte")
        }
        PrimitiveKind::DateTime => {
            SchemaProperty::typed(JsonType::String, nullable).with_format("date-time")
        }
        PrimitiveKind::Decimal128 => {
            SchemaProperty::typed(JsonType::String, nullable).with_format("decimal")
        }
        PrimitiveKind::ObjectId => {
            SchemaProperty::typed(JsonType::String, nullable).with_format("object-id")
        }
        // Opaque: any value
        PrimitiveKind::Null | PrimitiveKind::Undefined => SchemaProperty::default(),
    }
}
