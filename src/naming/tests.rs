//! Naming tests

use super::*;
use test_case::test_case;

// ============================================================================
// Inflection Tests
// ============================================================================

#[test_case("items", "item")]
#[test_case("categories", "category")]
#[test_case("boxes", "box")]
#[test_case("addresses", "address")]
#[test_case("wolves", "wolf")]
#[test_case("knives", "knife")]
#[test_case("movies", "movie")]
#[test_case("children", "child")]
#[test_case("people", "person")]
#[test_case("status", "status")]
#[test_case("data", "data")]
#[test_case("news", "news")]
#[test_case("item", "item")]
#[test_case("Orders", "order")]
fn test_singularize_word(plural: &str, singular: &str) {
    assert_eq!(singularize_word(plural), singular);
}

#[test_case("item", "items")]
#[test_case("category", "categories")]
#[test_case("key", "keys")]
#[test_case("box", "boxes")]
#[test_case("address", "addresses")]
#[test_case("leaf", "leaves")]
#[test_case("child", "children")]
#[test_case("tags", "tags")]
#[test_case("people", "people")]
#[test_case("status", "status")]
#[test_case("statuses", "statuses")]
#[test_case("data", "data")]
fn test_pluralize_word(singular: &str, plural: &str) {
    assert_eq!(pluralize_word(singular), plural);
}

// ============================================================================
// Rust Policy Tests
// ============================================================================

#[test_case("orders", "Order")]
#[test_case("AutoGenerated", "AutoGenerated")]
#[test_case("AutoGenerated_items", "AutoGeneratedItem")]
#[test_case("orders_line_items", "OrdersLineItem")]
#[test_case("user-profiles", "UserProfile")]
#[test_case("", "Struct")]
#[test_case("2fa", "Struct2fa")]
#[test_case("self", "SelfStruct")]
fn test_struct_name(path: &str, expected: &str) {
    assert_eq!(RustNamePolicy::new().struct_name(path), expected);
}

#[test_case("name", "name")]
#[test_case("createdAt", "created_at")]
#[test_case("_id", "id")]
#[test_case("user-ID", "user_id")]
#[test_case("type", "r#type")]
#[test_case("self", "self_")]
#[test_case("1st", "field_1st")]
#[test_case("$$", "field")]
fn test_exported_field(source: &str, expected: &str) {
    assert_eq!(RustNamePolicy::new().exported_field(source), expected);
}

#[test]
fn test_pluralize_last_word_only() {
    let names = RustNamePolicy::new();
    assert_eq!(names.pluralize("line_item"), "line_items");
    assert_eq!(names.pluralize("child_category"), "child_categories");
    assert_eq!(names.pluralize("tags"), "tags");
    assert_eq!(names.pluralize("order_status"), "order_status");
}

#[test]
fn test_pluralize_raw_identifier() {
    let names = RustNamePolicy::new();
    assert_eq!(names.pluralize("r#type"), "types");
}

#[test]
fn test_singularize_last_word_only() {
    let names = RustNamePolicy::new();
    assert_eq!(names.singularize("orders_items"), "orders_item");
}

#[test]
fn test_policy_is_deterministic() {
    let names = RustNamePolicy::new();
    for input in ["orders", "lineItems", "x_y_zs", "type"] {
        assert_eq!(names.struct_name(input), names.struct_name(input));
        assert_eq!(names.exported_field(input), names.exported_field(input));
    }
}
