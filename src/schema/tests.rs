//! Schema builder tests

use super::*;
use crate::accumulator::Accumulator;
use crate::document::{document_from_json, Document, ExtJsonOptions, PrimitiveKind};
use crate::naming::RustNamePolicy;
use crate::resolver::{FallbackReason, FieldType};
use pretty_assertions::assert_eq;
use rand::seq::SliceRandom;
use serde_json::json;

fn docs(values: Vec<serde_json::Value>) -> Vec<Document> {
    values
        .into_iter()
        .map(|v| document_from_json(v, ExtJsonOptions::default()).unwrap())
        .collect()
}

fn build(values: Vec<serde_json::Value>) -> Schema {
    let acc = Accumulator::from_documents(&docs(values));
    SchemaBuilder::new(&RustNamePolicy::new(), "Root").build(&acc)
}

fn field_names(schema: &StructSchema) -> Vec<&str> {
    schema.fields.iter().map(|f| f.display_name.as_str()).collect()
}

// ============================================================================
// Basic Building Tests
// ============================================================================

#[test]
fn test_end_to_end_nullability() {
    let schema = build(vec![
        json!({"a": 1, "b": "x"}),
        json!({"a": 2}),
        json!({"a": 3, "b": null}),
    ]);

    assert_eq!(schema.structs.len(), 1);
    let root = schema.root().unwrap();
    assert_eq!(root.name, "Root");

    let a = root.field("a").unwrap();
    assert_eq!(a.field_type, FieldType::primitive(PrimitiveKind::Int32));

    let b = root.field("b").unwrap();
    assert_eq!(
        b.field_type,
        FieldType::primitive(PrimitiveKind::String).with_nullable(true)
    );
    assert!(schema.report.is_empty());
}

#[test]
fn test_fields_sorted_by_display_name() {
    let schema = build(vec![json!({"zeta": 1, "Alpha": 2, "middleName": "m"})]);

    let root = schema.root().unwrap();
    assert_eq!(field_names(root), vec!["alpha", "middle_name", "zeta"]);
    assert!(root.field("middleName").unwrap().is_renamed());
    assert!(!root.field("zeta").unwrap().is_renamed());
}

#[test]
fn test_array_fields_are_pluralized() {
    let schema = build(vec![json!({"tag": ["a"], "child": [{"x": 1}], "tags": ["b"]})]);

    let root = schema.root().unwrap();
    assert_eq!(root.field("tag").unwrap().display_name, "tags");
    assert_eq!(root.field("child").unwrap().display_name, "children");
    // "tag" claimed the plural first
    assert_eq!(root.field("tags").unwrap().display_name, "tags_2");
}

#[test]
fn test_empty_input_yields_empty_root() {
    let acc = Accumulator::new();
    let schema = SchemaBuilder::new(&RustNamePolicy::new(), "AutoGenerated").build(&acc);

    assert_eq!(schema.structs.len(), 1);
    assert_eq!(schema.structs[0].name, "AutoGenerated");
    assert!(schema.structs[0].fields.is_empty());
}

// ============================================================================
// Nested Struct Tests
// ============================================================================

#[test]
fn test_nested_structs_breadth_first() {
    let schema = build(vec![json!({
        "customer": {"address": {"city": "x"}, "name": "n"},
        "items": [{"sku": "a", "price": {"$numberDecimal": "1.50"}}]
    })]);

    let names: Vec<&str> = schema.structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Root", "RootCustomer", "RootItem", "RootCustomerAddress"]
    );

    let item = schema.find("RootItem").unwrap();
    assert_eq!(item.path, "$.items[]");
    assert_eq!(field_names(item), vec!["price", "sku"]);

    let root = schema.root().unwrap();
    let refs: Vec<&str> = root.referenced_structs().collect();
    assert_eq!(refs, vec!["RootCustomer", "RootItem"]);
}

#[test]
fn test_nested_struct_nullability_uses_struct_count() {
    let schema = build(vec![
        json!({"meta": {"a": 1, "b": 1}}),
        json!({"meta": {"a": 2}}),
        json!({"other": true}),
    ]);

    let root = schema.root().unwrap();
    assert!(root.field("meta").unwrap().field_type.nullable);

    let meta = schema.find("RootMeta").unwrap();
    assert!(!meta.field("a").unwrap().field_type.nullable);
    assert!(meta.field("b").unwrap().field_type.nullable);
}

#[test]
fn test_null_parent_makes_nested_fields_nullable() {
    let schema = build(vec![json!({"meta": {"x": 1}}), json!({"meta": null})]);

    let root = schema.root().unwrap();
    assert_eq!(
        root.field("meta").unwrap().field_type,
        FieldType::struct_ref("RootMeta").with_nullable(true)
    );

    // meta visited twice, held a document once
    let meta = schema.find("RootMeta").unwrap();
    assert_eq!(
        meta.field("x").unwrap().field_type,
        FieldType::primitive(PrimitiveKind::Int32).with_nullable(true)
    );
}

#[test]
fn test_null_array_element_makes_struct_fields_nullable() {
    let schema = build(vec![json!({"rows": [{"x": 1}, null]})]);

    let row = schema.find("RootRow").unwrap();
    assert_eq!(row.path, "$.rows[]");
    assert!(row.field("x").unwrap().field_type.nullable);
}

#[test]
fn test_struct_name_collisions_get_suffix() {
    let schema = build(vec![json!({
        "item": {"a": 1},
        "items": [{"b": 2}]
    })]);

    let root = schema.root().unwrap();
    assert_eq!(root.field("item").unwrap().field_type.struct_name(), Some("RootItem"));
    assert_eq!(
        root.field("items").unwrap().field_type.struct_name(),
        Some("RootItem2")
    );
    assert!(schema.find("RootItem2").unwrap().field("b").is_some());
}

#[test]
fn test_each_struct_emitted_once() {
    let schema = build(vec![json!({"a": {"b": {"c": {"d": 1}}}})]);

    let mut names: Vec<&str> = schema.structs.iter().map(|s| s.name.as_str()).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(total, 4);
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_collects_fallbacks() {
    let schema = build(vec![
        json!({"mixed": 1, "nothing": null, "list": [1, "a"]}),
        json!({"mixed": "s"}),
    ]);

    let paths: Vec<&str> = schema.report.fallbacks().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["$.list[]", "$.mixed", "$.nothing"]);
    assert_eq!(
        schema.report.fallbacks()[2].reason,
        FallbackReason::NoCandidates
    );
}

#[test]
fn test_references_are_sorted_and_unique() {
    let schema = build(vec![json!({
        "_id": {"$oid": "5f1a2b3c4d5e6f7a8b9c0d1e"},
        "created": {"$date": "2024-01-01T00:00:00Z"},
        "updated": {"$date": "2024-01-02T00:00:00Z"},
        "nested": {"ref": {"$oid": "5f1a2b3c4d5e6f7a8b9c0d1f"}}
    })]);

    assert_eq!(
        schema.references(),
        vec!["bson::DateTime", "bson::oid::ObjectId"]
    );
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_build_is_deterministic_across_shard_orders() {
    let all = docs(vec![
        json!({"id": 1, "user": {"name": "a", "roles": ["admin"]}}),
        json!({"id": 2, "user": {"name": "b"}, "tags": ["x"]}),
        json!({"id": 3, "items": [{"sku": "1"}, {"sku": "2", "qty": 4}]}),
        json!({"id": 4, "user": null, "extra": {"k": 1.5}}),
        json!({"id": 5, "items": [], "tags": []}),
        json!({"id": 6, "extra": {"k": 2.5, "j": true}}),
    ]);
    let names = RustNamePolicy::new();
    let expected = SchemaBuilder::new(&names, "Root").build(&Accumulator::from_documents(&all));

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let mut shards: Vec<Accumulator> = all
            .chunks(2)
            .map(Accumulator::from_documents)
            .collect();
        shards.shuffle(&mut rng);

        let merged = Accumulator::merge_all(shards).unwrap();
        let schema = SchemaBuilder::new(&names, "Root").build(&merged);
        assert_eq!(schema, expected);
    }
}

#[test]
fn test_build_twice_is_identical() {
    let acc = Accumulator::from_documents(&docs(vec![
        json!({"a": {"x": 1}, "b": [{"y": 2}], "c": [1, "s"]}),
    ]));
    let names = RustNamePolicy::new();
    let builder = SchemaBuilder::new(&names, "Root");

    assert_eq!(builder.build(&acc), builder.build(&acc));
}
