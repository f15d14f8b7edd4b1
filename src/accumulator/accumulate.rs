//! Accumulator tree

use crate::document::{Document, PrimitiveKind, Value};
use crate::error::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Observation counters for one structural position
///
/// A position is the root, a struct field, or the element slot of an
/// array. Each node is owned by exactly one parent slot.
///
/// Invariant: `count >= document_count + array_count + sum(primitives)`.
/// The shortfall is the number of visits that were explicit nulls; a
/// parent whose count exceeds this node's count saw documents where the
/// field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    /// Times this position was visited
    count: u64,
    /// Times this position held a document
    document_count: u64,
    /// Child accumulators, present once a document was seen here
    fields: Option<HashMap<String, Accumulator>>,
    /// Times this position held an array
    array_count: u64,
    /// Union of every array element seen here, regardless of index
    element: Option<Box<Accumulator>>,
    /// Occurrences per primitive kind (never contains `Null`)
    primitives: HashMap<PrimitiveKind, u64>,
    /// An explicit null was seen here
    null_observed: bool,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an accumulator from a batch of documents
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut acc = Self::new();
        for doc in docs {
            acc.include_document(doc);
        }
        acc
    }

    /// Record a top-level document at this position
    pub fn include_document(&mut self, doc: &Document) {
        self.count += 1;
        self.record_document(doc);
    }

    /// Record one value at this position
    pub fn include_value(&mut self, value: &Value) {
        self.count += 1;
        match value {
            Value::Document(doc) => self.record_document(doc),
            Value::Array(items) => {
                self.array_count += 1;
                let element = self.element.get_or_insert_with(Box::default);
                for item in items {
                    element.include_value(item);
                }
            }
            Value::Null => self.null_observed = true,
            primitive => {
                if let Some(kind) = primitive.primitive_kind() {
                    *self.primitives.entry(kind).or_insert(0) += 1;
                }
            }
        }
    }

    fn record_document(&mut self, doc: &Document) {
        self.document_count += 1;
        let fields = self.fields.get_or_insert_with(HashMap::new);
        for (name, value) in doc.iter() {
            match fields.get_mut(name) {
                Some(child) => child.include_value(value),
                None => {
                    let mut child = Accumulator::new();
                    child.include_value(value);
                    fields.insert(name.to_string(), child);
                }
            }
        }
    }

    /// Merge another accumulator built from a disjoint set of documents
    ///
    /// Fails with `Error::MergeConflict` when the same path was a pure
    /// document on one side and a pure primitive on the other. The check
    /// covers the whole tree before anything is combined, so on error
    /// `self` is unchanged.
    pub fn merge(&mut self, other: Accumulator) -> Result<()> {
        self.check_mergeable(&other, "$")?;
        self.merge_unchecked(other);
        Ok(())
    }

    /// Fold a set of accumulators into one
    pub fn merge_all(accumulators: impl IntoIterator<Item = Accumulator>) -> Result<Self> {
        let mut merged = Self::new();
        for acc in accumulators {
            merged.merge(acc)?;
        }
        Ok(merged)
    }

    fn check_mergeable(&self, other: &Accumulator, path: &str) -> Result<()> {
        if (self.is_pure_document() && other.is_pure_primitive())
            || (self.is_pure_primitive() && other.is_pure_document())
        {
            return Err(Error::merge_conflict(
                path,
                self.describe_branches(),
                other.describe_branches(),
            ));
        }

        if let (Some(ours), Some(theirs)) = (&self.fields, &other.fields) {
            for (name, their_child) in theirs {
                if let Some(our_child) = ours.get(name) {
                    our_child.check_mergeable(their_child, &format!("{path}.{name}"))?;
                }
            }
        }

        if let (Some(ours), Some(theirs)) = (&self.element, &other.element) {
            ours.check_mergeable(theirs, &format!("{path}[]"))?;
        }

        Ok(())
    }

    fn merge_unchecked(&mut self, other: Accumulator) {
        self.count += other.count;
        self.document_count += other.document_count;
        self.array_count += other.array_count;
        self.null_observed |= other.null_observed;

        if let Some(their_fields) = other.fields {
            let ours = self.fields.get_or_insert_with(HashMap::new);
            for (name, child) in their_fields {
                match ours.entry(name) {
                    Entry::Occupied(mut slot) => slot.get_mut().merge_unchecked(child),
                    Entry::Vacant(slot) => {
                        slot.insert(child);
                    }
                }
            }
        }

        if let Some(theirs) = other.element {
            if let Some(ours) = self.element.as_mut() {
                ours.merge_unchecked(*theirs);
            } else {
                self.element = Some(theirs);
            }
        }

        for (kind, n) in other.primitives {
            *self.primitives.entry(kind).or_insert(0) += n;
        }
    }

    fn is_pure_document(&self) -> bool {
        self.document_count > 0 && self.array_count == 0 && self.primitives.is_empty()
    }

    fn is_pure_primitive(&self) -> bool {
        self.document_count == 0 && self.array_count == 0 && !self.primitives.is_empty()
    }

    /// Human-readable summary of the populated branches, e.g. `document|int32`
    pub fn describe_branches(&self) -> String {
        let mut parts = Vec::new();
        if self.document_count > 0 {
            parts.push("document".to_string());
        }
        if self.array_count > 0 {
            parts.push("array".to_string());
        }
        let mut kinds: Vec<_> = self.primitives.keys().collect();
        kinds.sort();
        parts.extend(kinds.into_iter().map(ToString::to_string));
        if parts.is_empty() {
            if self.null_observed {
                "null".to_string()
            } else {
                "nothing".to_string()
            }
        } else {
            parts.join("|")
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Times this position was visited
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Times this position held a document
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// Times this position held an array
    pub fn array_count(&self) -> u64 {
        self.array_count
    }

    /// Child accumulators, if this position ever held a document
    pub fn fields(&self) -> Option<&HashMap<String, Accumulator>> {
        self.fields.as_ref()
    }

    /// A single child accumulator
    pub fn field(&self, name: &str) -> Option<&Accumulator> {
        self.fields.as_ref().and_then(|f| f.get(name))
    }

    /// Element accumulator, if this position ever held an array
    pub fn element(&self) -> Option<&Accumulator> {
        self.element.as_deref()
    }

    /// Occurrences per primitive kind
    pub fn primitives(&self) -> &HashMap<PrimitiveKind, u64> {
        &self.primitives
    }

    /// Occurrences of one primitive kind
    pub fn primitive_count(&self, kind: PrimitiveKind) -> u64 {
        self.primitives.get(&kind).copied().unwrap_or(0)
    }

    /// An explicit null was seen here
    pub fn null_observed(&self) -> bool {
        self.null_observed
    }

    /// Sum of all non-null type observations
    pub fn type_count(&self) -> u64 {
        self.document_count + self.array_count + self.primitives.values().sum::<u64>()
    }

    /// Number of structural positions in this tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .fields
            .iter()
            .flat_map(HashMap::values)
            .map(Accumulator::node_count)
            .sum::<usize>()
            + self.element.as_ref().map_or(0, |e| e.node_count())
    }
}
