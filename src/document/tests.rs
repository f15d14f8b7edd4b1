//! Tests for the document module

use super::*;
use serde_json::json;

fn convert(value: serde_json::Value) -> Value {
    value_from_json(value, ExtJsonOptions::default()).unwrap()
}

// ============================================================================
// Document Tests
// ============================================================================

#[test]
fn test_document_insert_preserves_order() {
    let doc = Document::new().with("b", 1).with("a", "x").with("c", true);

    let keys: Vec<_> = doc.keys().collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_document_insert_replaces_in_place() {
    let mut doc = Document::new().with("a", 1).with("b", 2);
    doc.insert("a", "replaced");

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.keys().next(), Some("a"));
    assert_eq!(doc.get("a"), Some(&Value::String("replaced".to_string())));
}

#[test]
fn test_value_primitive_kind() {
    assert_eq!(Value::Null.primitive_kind(), Some(PrimitiveKind::Null));
    assert_eq!(Value::Int64(1).primitive_kind(), Some(PrimitiveKind::Int64));
    assert_eq!(Value::Array(vec![]).primitive_kind(), None);
    assert_eq!(Value::Document(Document::new()).primitive_kind(), None);
    assert_eq!(Value::Array(vec![]).describe(), "array");
    assert_eq!(Value::ObjectId("0".repeat(24)).describe(), "object_id");
}

// ============================================================================
// Plain JSON Tests
// ============================================================================

#[test]
fn test_plain_json_numbers() {
    assert_eq!(convert(json!(42)), Value::Int32(42));
    assert_eq!(convert(json!(-7)), Value::Int32(-7));
    assert_eq!(convert(json!(3_000_000_000_i64)), Value::Int64(3_000_000_000));
    assert_eq!(convert(json!(1.5)), Value::Double(1.5));
    assert!(matches!(convert(json!(u64::MAX)), Value::Double(_)));
}

#[test]
fn test_plain_json_nested() {
    let value = convert(json!({
        "name": "widget",
        "tags": ["a", "b"],
        "dims": {"w": 1, "h": 2},
        "gone": null
    }));

    let doc = value.as_document().unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.get("tags").unwrap().as_array().unwrap().len(), 2);
    assert_eq!(doc.get("dims").unwrap().as_document().unwrap().len(), 2);
    assert!(doc.get("gone").unwrap().is_null());
}

#[test]
fn test_json_key_order_is_kept() {
    let doc = document_from_json(json!({"z": 1, "a": 2, "m": 3}), ExtJsonOptions::default())
        .unwrap();
    let keys: Vec<_> = doc.keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_document_from_json_rejects_non_object() {
    let err = document_from_json(json!([1, 2]), ExtJsonOptions::default()).unwrap_err();
    assert!(err.to_string().contains("expected a document"));

    let err = document_from_json(json!({"$oid": "5f1d7a9e8b3c2a1d0e4f6a7b"}), ExtJsonOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("found object_id"));
}

// ============================================================================
// Extended JSON Tests
// ============================================================================

#[test]
fn test_extjson_object_id() {
    let value = convert(json!({"$oid": "5F1D7A9E8B3C2A1D0E4F6A7B"}));
    assert_eq!(value, Value::ObjectId("5f1d7a9e8b3c2a1d0e4f6a7b".to_string()));
}

#[test]
fn test_extjson_object_id_invalid() {
    let err = value_from_json(json!({"_id": {"$oid": "xyz"}}), ExtJsonOptions::default())
        .unwrap_err();
    assert!(err.is_source_error());
    assert!(err.to_string().contains("$._id.$oid"));
}

#[test]
fn test_extjson_dates() {
    let relaxed = convert(json!({"$date": "2024-01-15T10:30:00Z"}));
    let canonical = convert(json!({"$date": {"$numberLong": "1705314600000"}}));

    assert_eq!(relaxed, canonical);
    assert_eq!(relaxed.primitive_kind(), Some(PrimitiveKind::DateTime));
}

#[test]
fn test_extjson_numbers() {
    assert_eq!(convert(json!({"$numberLong": "7"})), Value::Int64(7));
    assert_eq!(convert(json!({"$numberInt": "7"})), Value::Int32(7));
    assert_eq!(convert(json!({"$numberDouble": "2.5"})), Value::Double(2.5));
    assert_eq!(
        convert(json!({"$numberDecimal": "1.10"})),
        Value::Decimal128("1.10".to_string())
    );
    assert!(value_from_json(json!({"$numberLong": "seven"}), ExtJsonOptions::default()).is_err());
}

#[test]
fn test_extjson_binary_canonical_and_legacy() {
    let canonical = convert(json!({"$binary": {"base64": "AQID", "subType": "00"}}));
    let legacy = convert(json!({"$binary": "AQID", "$type": "00"}));

    let expected = Value::Binary {
        subtype: 0,
        bytes: vec![1, 2, 3],
    };
    assert_eq!(canonical, expected);
    assert_eq!(legacy, expected);
}

#[test]
fn test_extjson_timestamp() {
    let value = convert(json!({"$timestamp": {"t": 1_700_000_000, "i": 3}}));
    assert_eq!(
        value,
        Value::Timestamp {
            time: 1_700_000_000,
            increment: 3
        }
    );
}

#[test]
fn test_extjson_opaque_wrappers() {
    assert_eq!(convert(json!({"$minKey": 1})), Value::Undefined);
    assert_eq!(
        convert(json!({"$regularExpression": {"pattern": "a+", "options": ""}})),
        Value::Undefined
    );
    assert_eq!(convert(json!({"$code": "function() {}"})), Value::Undefined);
}

#[test]
fn test_unknown_dollar_key_is_plain_document() {
    let value = convert(json!({"$set": {"a": 1}}));
    let doc = value.as_document().unwrap();
    assert!(doc.contains_key("$set"));
}

#[test]
fn test_extended_json_disabled() {
    let value = value_from_json(
        json!({"$oid": "5f1d7a9e8b3c2a1d0e4f6a7b"}),
        ExtJsonOptions::plain(),
    )
    .unwrap();

    let doc = value.as_document().unwrap();
    assert_eq!(
        doc.get("$oid"),
        Some(&Value::String("5f1d7a9e8b3c2a1d0e4f6a7b".to_string()))
    );
}
