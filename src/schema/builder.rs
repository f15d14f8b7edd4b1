//! Breadth-first schema builder

use super::types::{FieldSchema, ResolutionReport, Schema, StructSchema};
use crate::accumulator::Accumulator;
use crate::naming::NamePolicy;
use crate::resolver::Resolver;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// A struct waiting to be built
struct Pending<'acc> {
    acc: &'acc Accumulator,
    name: String,
    name_path: String,
    source_path: String,
}

/// Builds the struct list from a finished accumulator
pub struct SchemaBuilder<'p> {
    names: &'p dyn NamePolicy,
    base_name: String,
}

impl<'p> SchemaBuilder<'p> {
    /// Create a builder whose root struct is named after `base_name`
    pub fn new(names: &'p dyn NamePolicy, base_name: impl Into<String>) -> Self {
        Self {
            names,
            base_name: base_name.into(),
        }
    }

    /// Build the schema
    ///
    /// The accumulator is only read; building twice gives identical output.
    pub fn build(&self, root: &Accumulator) -> Schema {
        let resolver = Resolver::new(self.names);
        let mut taken = HashSet::new();
        let mut report = ResolutionReport::new();
        let mut structs = Vec::new();

        let root_name = reserve(&mut taken, self.names.struct_name(&self.base_name));
        let mut queue = VecDeque::from([Pending {
            acc: root,
            name_path: root_name.clone(),
            name: root_name,
            source_path: "$".to_string(),
        }]);

        while let Some(pending) = queue.pop_front() {
            let mut fields = Vec::new();
            let mut display_taken = HashSet::new();

            if let Some(children) = pending.acc.fields() {
                let mut field_names: Vec<&String> = children.keys().collect();
                field_names.sort();

                for field_name in field_names {
                    let child = &children[field_name];
                    let name_path = format!("{}_{}", pending.name_path, field_name);
                    let source_path = format!("{}.{}", pending.source_path, field_name);

                    let resolution = resolver.resolve(
                        child,
                        pending.acc.count(),
                        &name_path,
                        &source_path,
                    );
                    report.extend(resolution.fallbacks);
                    let mut field_type = resolution.field_type;

                    if let Some(nested) = resolution.nested {
                        let proposed = field_type.struct_name().unwrap_or_default().to_string();
                        let name = reserve(&mut taken, proposed);
                        field_type.rename_struct(&name);
                        let depth = field_type.array_depth();
                        queue.push_back(Pending {
                            acc: nested,
                            name,
                            name_path,
                            source_path: format!("{source_path}{}", "[]".repeat(depth)),
                        });
                    }

                    let mut display_name = self.names.exported_field(field_name);
                    if field_type.array_depth() >= 1 {
                        display_name = self.names.pluralize(&display_name);
                    }

                    fields.push(FieldSchema {
                        source_name: field_name.clone(),
                        display_name: reserve_field(&mut display_taken, display_name),
                        field_type,
                    });
                }
            }

            fields.sort_by(|a, b| {
                a.display_name
                    .cmp(&b.display_name)
                    .then_with(|| a.source_name.cmp(&b.source_name))
            });

            debug!(
                name = %pending.name,
                path = %pending.source_path,
                fields = fields.len(),
                "Built struct"
            );
            structs.push(StructSchema {
                name: pending.name,
                path: pending.source_path,
                fields,
            });
        }

        Schema { structs, report }
    }
}

/// Claim `name`, or the first free `name2`, `name3`, ...
fn reserve(taken: &mut HashSet<String>, name: String) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let unique = (2..)
        .map(|n| format!("{name}{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(name);
    taken.insert(unique.clone());
    unique
}

/// Claim a field identifier, or the first free `name_2`, `name_3`, ...
fn reserve_field(taken: &mut HashSet<String>, name: String) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let bare = name.strip_prefix("r#").unwrap_or(&name);
    let unique = (2..)
        .map(|n| format!("{bare}_{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.clone());
    taken.insert(unique.clone());
    unique
}
