//! Schema types

use crate::resolver::{Fallback, FieldType};
use serde::{Deserialize, Serialize};

/// One field of a generated struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name exactly as it appears in the documents
    pub source_name: String,
    /// Identifier used in generated code
    pub display_name: String,
    /// Resolved type
    pub field_type: FieldType,
}

impl FieldSchema {
    /// Check if the generated name differs from the document key
    pub fn is_renamed(&self) -> bool {
        self.source_name != self.display_name
    }
}

/// A named struct definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    /// Unique struct name
    pub name: String,
    /// Source path of the documents this struct describes, e.g. `$.items[]`
    pub path: String,
    /// Fields sorted by display name
    pub fields: Vec<FieldSchema>,
}

impl StructSchema {
    /// Look up a field by its source name
    pub fn field(&self, source_name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.source_name == source_name)
    }

    /// Names of the structs this one references directly
    pub fn referenced_structs(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.field_type.struct_name())
    }
}

/// Fallback resolutions collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionReport {
    fallbacks: Vec<Fallback>,
}

impl ResolutionReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append fallbacks
    pub fn extend(&mut self, fallbacks: impl IntoIterator<Item = Fallback>) {
        self.fallbacks.extend(fallbacks);
    }

    /// All fallbacks in the order they were taken
    pub fn fallbacks(&self) -> &[Fallback] {
        &self.fallbacks
    }

    /// Number of fallbacks
    pub fn len(&self) -> usize {
        self.fallbacks.len()
    }

    /// Check if no fallback was taken
    pub fn is_empty(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Builder output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Root first, then nested structs breadth-first
    pub structs: Vec<StructSchema>,
    /// Fallback diagnostics
    pub report: ResolutionReport,
}

impl Schema {
    /// The root struct
    pub fn root(&self) -> Option<&StructSchema> {
        self.structs.first()
    }

    /// Find a struct by name
    pub fn find(&self, name: &str) -> Option<&StructSchema> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Distinct external references used by any field, sorted
    pub fn references(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = self
            .structs
            .iter()
            .flat_map(|s| s.fields.iter())
            .filter_map(|f| f.field_type.reference())
            .collect();
        refs.sort_unstable();
        refs.dedup();
        refs
    }
}
