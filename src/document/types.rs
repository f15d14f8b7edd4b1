//! Document types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete kind of a primitive value
///
/// `Null` is a pseudo-kind: accumulators record it as a flag and never
/// count it as a type candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Int32,
    Int64,
    Double,
    String,
    Binary,
    DateTime,
    Decimal128,
    ObjectId,
    Timestamp,
    Null,
    /// Anything the decoder could not map to a concrete kind
    Undefined,
}

impl PrimitiveKind {
    /// Stable lowercase name used in diagnostics and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Binary => "binary",
            PrimitiveKind::DateTime => "datetime",
            PrimitiveKind::Decimal128 => "decimal128",
            PrimitiveKind::ObjectId => "object_id",
            PrimitiveKind::Timestamp => "timestamp",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
        }
    }

    /// Check if this is the null pseudo-kind
    pub fn is_null(&self) -> bool {
        matches!(self, PrimitiveKind::Null)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value inside a document
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
    Binary { subtype: u8, bytes: Vec<u8> },
    DateTime(DateTime<Utc>),
    /// Decimal128 kept in its textual form
    Decimal128(String),
    /// 24 hex digit object identifier
    ObjectId(String),
    Timestamp { time: u32, increment: u32 },
    Undefined,
    Array(Vec<Value>),
    Document(Document),
}

impl Value {
    /// Primitive kind of this value, `None` for arrays and documents
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Value::Null => PrimitiveKind::Null,
            Value::Boolean(_) => PrimitiveKind::Boolean,
            Value::Int32(_) => PrimitiveKind::Int32,
            Value::Int64(_) => PrimitiveKind::Int64,
            Value::Double(_) => PrimitiveKind::Double,
            Value::String(_) => PrimitiveKind::String,
            Value::Binary { .. } => PrimitiveKind::Binary,
            Value::DateTime(_) => PrimitiveKind::DateTime,
            Value::Decimal128(_) => PrimitiveKind::Decimal128,
            Value::ObjectId(_) => PrimitiveKind::ObjectId,
            Value::Timestamp { .. } => PrimitiveKind::Timestamp,
            Value::Undefined => PrimitiveKind::Undefined,
            Value::Array(_) | Value::Document(_) => return None,
        };
        Some(kind)
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the nested document, if this value is one
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Get the array elements, if this value is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short description of the value's shape, for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Array(_) => "array",
            Value::Document(_) => "document",
            other => other
                .primitive_kind()
                .map_or("unknown", |kind| kind.as_str()),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Ordered mapping of field name to value
///
/// Field order is the order of first insertion. Inserting an existing
/// name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a field's value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check if a field is present
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over fields in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
