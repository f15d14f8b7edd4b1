//! Candidate selection for a single accumulator node

use super::types::{Fallback, FallbackReason, FieldType};
use crate::accumulator::Accumulator;
use crate::naming::NamePolicy;
use tracing::debug;

/// Result of resolving one position
#[derive(Debug, Clone)]
pub struct Resolution<'acc> {
    /// The single chosen type
    pub field_type: FieldType,
    /// Accumulator defining the referenced struct, when the chosen type is
    /// a struct (possibly behind arrays)
    pub nested: Option<&'acc Accumulator>,
    /// Fallbacks taken at this position or inside its array elements
    pub fallbacks: Vec<Fallback>,
}

/// Resolves accumulator nodes to field types
///
/// Stateless apart from the borrowed name policy, so resolving the same
/// node twice always yields the same result.
pub struct Resolver<'p> {
    names: &'p dyn NamePolicy,
}

impl<'p> Resolver<'p> {
    /// Create a resolver using the given name policy
    pub fn new(names: &'p dyn NamePolicy) -> Self {
        Self { names }
    }

    /// Resolve `acc` to a single type
    ///
    /// `seen_count` is how many times the enclosing structure could have
    /// held this position. `name_path` feeds struct naming, `source_path`
    /// is only used for diagnostics.
    pub fn resolve<'acc>(
        &self,
        acc: &'acc Accumulator,
        seen_count: u64,
        name_path: &str,
        source_path: &str,
    ) -> Resolution<'acc> {
        let mut fallbacks = Vec::new();
        let (field_type, nested) =
            self.resolve_node(acc, seen_count, name_path, source_path, &mut fallbacks);
        Resolution {
            field_type,
            nested,
            fallbacks,
        }
    }

    /// Every candidate type for `acc`, ignoring nullability
    ///
    /// Struct candidates come first, then the array candidate, then
    /// primitives in kind order.
    pub fn candidates(&self, acc: &Accumulator, name_path: &str) -> Vec<FieldType> {
        let mut ignored = Vec::new();
        self.collect_candidates(acc, name_path, "$", &mut ignored)
            .into_iter()
            .map(|(candidate, _)| candidate)
            .collect()
    }

    fn resolve_node<'acc>(
        &self,
        acc: &'acc Accumulator,
        seen_count: u64,
        name_path: &str,
        source_path: &str,
        fallbacks: &mut Vec<Fallback>,
    ) -> (FieldType, Option<&'acc Accumulator>) {
        let nullable = acc.null_observed() || seen_count > acc.type_count();
        let mut candidates = self.collect_candidates(acc, name_path, source_path, fallbacks);

        match candidates.len() {
            0 => {
                debug!(path = %source_path, "No type observed, using opaque type");
                fallbacks.push(Fallback {
                    path: source_path.to_string(),
                    reason: FallbackReason::NoCandidates,
                });
                (FieldType::opaque(), None)
            }
            1 => {
                let (candidate, nested) = candidates.remove(0);
                (candidate.with_nullable(nullable), nested)
            }
            _ => {
                let described: Vec<String> =
                    candidates.iter().map(|(c, _)| c.to_string()).collect();
                debug!(
                    path = %source_path,
                    candidates = %described.join(", "),
                    "Heterogeneous types, using opaque type"
                );
                fallbacks.push(Fallback {
                    path: source_path.to_string(),
                    reason: FallbackReason::Heterogeneous(described),
                });
                (FieldType::opaque().with_nullable(nullable), None)
            }
        }
    }

    fn collect_candidates<'acc>(
        &self,
        acc: &'acc Accumulator,
        name_path: &str,
        source_path: &str,
        fallbacks: &mut Vec<Fallback>,
    ) -> Vec<(FieldType, Option<&'acc Accumulator>)> {
        let mut candidates = Vec::new();

        if acc.document_count() > 0 {
            let name = self.names.struct_name(name_path);
            candidates.push((FieldType::struct_ref(name), Some(acc)));
        }

        if acc.array_count() > 0 {
            if let Some(element) = acc.element() {
                let element_path = format!("{source_path}[]");
                let (element_type, nested) = self.resolve_node(
                    element,
                    element.count(),
                    name_path,
                    &element_path,
                    fallbacks,
                );
                candidates.push((FieldType::array_of(element_type), nested));
            }
        }

        let mut kinds: Vec<_> = acc
            .primitives()
            .iter()
            .filter(|(_, &n)| n > 0)
            .map(|(&kind, _)| kind)
            .collect();
        kinds.sort();
        candidates.extend(kinds.into_iter().map(|kind| (FieldType::primitive(kind), None)));

        candidates
    }
}
