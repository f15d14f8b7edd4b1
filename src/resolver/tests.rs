//! Resolver tests

use super::*;
use crate::accumulator::Accumulator;
use crate::document::{document_from_json, Document, ExtJsonOptions, PrimitiveKind};
use crate::naming::RustNamePolicy;
use pretty_assertions::assert_eq;
use serde_json::json;

fn accumulate(values: Vec<serde_json::Value>) -> Accumulator {
    let docs: Vec<Document> = values
        .into_iter()
        .map(|v| document_from_json(v, ExtJsonOptions::default()).unwrap())
        .collect();
    Accumulator::from_documents(&docs)
}

fn resolve_field<'a>(acc: &'a Accumulator, field: &str) -> Resolution<'a> {
    let names = RustNamePolicy::new();
    let resolver = Resolver::new(&names);
    resolver.resolve(
        acc.field(field).unwrap(),
        acc.count(),
        &format!("Root_{field}"),
        &format!("$.{field}"),
    )
}

#[test]
fn test_single_primitive_not_nullable() {
    let acc = accumulate(vec![json!({"a": 1}), json!({"a": 2})]);
    let resolved = resolve_field(&acc, "a");

    assert_eq!(resolved.field_type, FieldType::primitive(PrimitiveKind::Int32));
    assert!(resolved.fallbacks.is_empty());
    assert!(resolved.nested.is_none());
}

#[test]
fn test_structural_absence_makes_nullable() {
    let acc = accumulate(vec![json!({"x": 1}), json!({"x": 2}), json!({})]);
    let resolved = resolve_field(&acc, "x");

    assert_eq!(resolved.field_type.to_string(), "int32?");
    assert!(resolved.field_type.nullable);
}

#[test]
fn test_explicit_null_makes_nullable() {
    let acc = accumulate(vec![json!({"b": "x"}), json!({"b": null})]);
    let resolved = resolve_field(&acc, "b");

    assert_eq!(
        resolved.field_type,
        FieldType::primitive(PrimitiveKind::String).with_nullable(true)
    );
}

#[test]
fn test_null_only_field_falls_back_nullable() {
    let acc = accumulate(vec![json!({"n": null}), json!({"n": null})]);
    let resolved = resolve_field(&acc, "n");

    assert!(resolved.field_type.is_opaque());
    assert!(resolved.field_type.nullable);
    assert_eq!(
        resolved.fallbacks,
        vec![Fallback {
            path: "$.n".to_string(),
            reason: FallbackReason::NoCandidates,
        }]
    );
}

#[test]
fn test_heterogeneous_primitives_fall_back() {
    let acc = accumulate(vec![json!({"v": 1}), json!({"v": "one"})]);
    let resolved = resolve_field(&acc, "v");

    assert!(resolved.field_type.is_opaque());
    // Present in every document and never null
    assert!(!resolved.field_type.nullable);
    assert_eq!(
        resolved.fallbacks[0].reason,
        FallbackReason::Heterogeneous(vec!["int32".to_string(), "string".to_string()])
    );
}

#[test]
fn test_heterogeneous_array_elements_do_not_fail() {
    let acc = accumulate(vec![json!({"xs": [1, 2, "three"]})]);
    let resolved = resolve_field(&acc, "xs");

    assert_eq!(resolved.field_type.array_depth(), 1);
    assert!(resolved.field_type.is_opaque());
    assert!(!resolved.field_type.nullable);
    assert_eq!(resolved.fallbacks[0].path, "$.xs[]");
}

#[test]
fn test_element_nullability_uses_element_count() {
    let acc = accumulate(vec![json!({"xs": [1, null]}), json!({"xs": [3]})]);
    let resolved = resolve_field(&acc, "xs");

    assert!(!resolved.field_type.nullable);
    match &resolved.field_type.kind {
        TypeKind::ArrayOf { element } => {
            assert!(element.nullable);
            assert_eq!(
                element.as_ref().clone().with_nullable(false),
                FieldType::primitive(PrimitiveKind::Int32)
            );
        }
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn test_nested_arrays_count_depth() {
    let acc = accumulate(vec![json!({"m": [[1, 2], [3]]})]);
    let resolved = resolve_field(&acc, "m");

    assert_eq!(resolved.field_type.array_depth(), 2);
    assert_eq!(resolved.field_type.to_string(), "[[int32]]");
}

#[test]
fn test_struct_candidate_carries_accumulator() {
    let acc = accumulate(vec![json!({"customer": {"name": "a"}})]);
    let resolved = resolve_field(&acc, "customer");

    assert_eq!(resolved.field_type.struct_name(), Some("RootCustomer"));
    let nested = resolved.nested.unwrap();
    assert_eq!(nested.field("name").unwrap().count(), 1);
}

#[test]
fn test_array_of_structs_singularizes_name() {
    let acc = accumulate(vec![json!({"items": [{"sku": "a"}, {"sku": "b"}]})]);
    let resolved = resolve_field(&acc, "items");

    assert_eq!(resolved.field_type.array_depth(), 1);
    assert_eq!(resolved.field_type.struct_name(), Some("RootItem"));
    assert_eq!(resolved.nested.unwrap().document_count(), 2);
}

#[test]
fn test_document_and_primitive_fall_back_without_struct() {
    let acc = accumulate(vec![json!({"v": {"k": 1}}), json!({"v": 5})]);
    let resolved = resolve_field(&acc, "v");

    assert!(resolved.field_type.is_opaque());
    assert!(resolved.nested.is_none());
}

#[test]
fn test_empty_arrays_only() {
    let acc = accumulate(vec![json!({"tags": []})]);
    let resolved = resolve_field(&acc, "tags");

    assert_eq!(resolved.field_type.array_depth(), 1);
    assert!(resolved.field_type.is_opaque());
    assert_eq!(resolved.fallbacks[0].path, "$.tags[]");
}

#[test]
fn test_extended_json_types_carry_references() {
    let acc = accumulate(vec![json!({
        "_id": {"$oid": "5f1a2b3c4d5e6f7a8b9c0d1e"},
        "at": {"$date": "2024-01-01T00:00:00Z"}
    })]);

    assert_eq!(
        resolve_field(&acc, "_id").field_type.reference(),
        Some("bson::oid::ObjectId")
    );
    assert_eq!(
        resolve_field(&acc, "at").field_type.reference(),
        Some("bson::DateTime")
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let acc = accumulate(vec![
        json!({"a": 1, "b": [1, "x"], "c": {"d": null}}),
        json!({"a": null, "c": {"d": 2}}),
    ]);
    for field in ["a", "b", "c"] {
        let first = resolve_field(&acc, field);
        let second = resolve_field(&acc, field);
        assert_eq!(first.field_type, second.field_type);
        assert_eq!(first.fallbacks, second.fallbacks);
    }
}

#[test]
fn test_candidates_lists_every_branch() {
    let acc = accumulate(vec![
        json!({"v": {"k": 1}}),
        json!({"v": [true]}),
        json!({"v": "s"}),
        json!({"v": 1}),
    ]);
    let names = RustNamePolicy::new();
    let resolver = Resolver::new(&names);

    let candidates: Vec<String> = resolver
        .candidates(acc.field("v").unwrap(), "Root_v")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(candidates, vec!["RootV", "[boolean]", "int32", "string"]);
}
