//! Resolved type model

use crate::document::PrimitiveKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// A primitive, with the target type name and the external path it
    /// must be imported from (if any)
    Primitive {
        primitive: PrimitiveKind,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },
    /// A generated struct, linked by name
    StructRef { name: String },
    /// An array of the element type
    ArrayOf { element: Box<FieldType> },
}

/// Resolver output for one structural position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    #[serde(flatten)]
    pub kind: TypeKind,
    pub nullable: bool,
}

impl FieldType {
    /// Target type for a primitive kind, not nullable
    pub fn primitive(kind: PrimitiveKind) -> Self {
        let (name, reference) = match kind {
            PrimitiveKind::Boolean => ("bool", None),
            PrimitiveKind::Int32 => ("i32", None),
            PrimitiveKind::Int64 => ("i64", None),
            PrimitiveKind::Double => ("f64", None),
            PrimitiveKind::String => ("String", None),
            PrimitiveKind::Binary => ("Vec<u8>", None),
            PrimitiveKind::DateTime => ("DateTime", Some("bson::DateTime")),
            PrimitiveKind::Decimal128 => ("Decimal128", Some("bson::Decimal128")),
            PrimitiveKind::ObjectId => ("ObjectId", Some("bson::oid::ObjectId")),
            PrimitiveKind::Timestamp => ("Timestamp", Some("bson::Timestamp")),
            PrimitiveKind::Null | PrimitiveKind::Undefined => ("Bson", Some("bson::Bson")),
        };

        let primitive = if kind.is_null() {
            PrimitiveKind::Undefined
        } else {
            kind
        };

        Self {
            kind: TypeKind::Primitive {
                primitive,
                name: name.to_string(),
                reference: reference.map(String::from),
            },
            nullable: false,
        }
    }

    /// The opaque fallback type, always nullable
    pub fn opaque() -> Self {
        Self::primitive(PrimitiveKind::Undefined).with_nullable(true)
    }

    /// Reference to a generated struct
    pub fn struct_ref(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::StructRef { name: name.into() },
            nullable: false,
        }
    }

    /// Array of `element`
    pub fn array_of(element: FieldType) -> Self {
        Self {
            kind: TypeKind::ArrayOf {
                element: Box::new(element),
            },
            nullable: false,
        }
    }

    /// Set nullability
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Number of array levels wrapped around the innermost type
    pub fn array_depth(&self) -> usize {
        match &self.kind {
            TypeKind::ArrayOf { element } => 1 + element.array_depth(),
            _ => 0,
        }
    }

    /// Innermost non-array type
    pub fn innermost(&self) -> &FieldType {
        match &self.kind {
            TypeKind::ArrayOf { element } => element.innermost(),
            _ => self,
        }
    }

    /// Name of the referenced struct, looking through arrays
    pub fn struct_name(&self) -> Option<&str> {
        match &self.innermost().kind {
            TypeKind::StructRef { name } => Some(name),
            _ => None,
        }
    }

    /// External reference of the innermost primitive, if any
    pub fn reference(&self) -> Option<&str> {
        match &self.innermost().kind {
            TypeKind::Primitive { reference, .. } => reference.as_deref(),
            _ => None,
        }
    }

    /// Point the innermost struct reference at `new_name`
    pub fn rename_struct(&mut self, new_name: &str) {
        match &mut self.kind {
            TypeKind::ArrayOf { element } => element.rename_struct(new_name),
            TypeKind::StructRef { name } => *name = new_name.to_string(),
            TypeKind::Primitive { .. } => {}
        }
    }

    /// Check if the innermost type is the opaque fallback
    pub fn is_opaque(&self) -> bool {
        matches!(
            self.innermost().kind,
            TypeKind::Primitive {
                primitive: PrimitiveKind::Undefined,
                ..
            }
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Primitive { primitive, .. } => write!(f, "{primitive}")?,
            TypeKind::StructRef { name } => write!(f, "{name}")?,
            TypeKind::ArrayOf { element } => write!(f, "[{element}]")?,
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Why a position fell back to the opaque type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "candidates", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Only nulls (or nothing) were observed
    NoCandidates,
    /// Several incompatible candidates, described in sorted order
    Heterogeneous(Vec<String>),
}

/// Informational diagnostic for a fallback resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallback {
    /// Source path, e.g. `$.items[].price`
    pub path: String,
    #[serde(flatten)]
    pub reason: FallbackReason,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FallbackReason::NoCandidates => write!(f, "{}: no type observed", self.path),
            FallbackReason::Heterogeneous(candidates) => {
                write!(f, "{}: mixed types {}", self.path, candidates.join(", "))
            }
        }
    }
}
