//! Conversion from JSON into documents
//!
//! Plain JSON maps onto booleans, numbers, strings, arrays and documents.
//! When extended JSON is enabled, single-purpose wrapper objects such as
//! `{"$oid": "..."}` or `{"$date": "..."}` (MongoDB Extended JSON v2,
//! canonical and relaxed) become the typed primitives they encode.

use super::types::{Document, Value};
use crate::error::{Error, Result};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

/// Options controlling JSON conversion
#[derive(Debug, Clone, Copy)]
pub struct ExtJsonOptions {
    /// Interpret `$`-prefixed wrapper objects as typed values
    pub extended: bool,
}

impl Default for ExtJsonOptions {
    fn default() -> Self {
        Self { extended: true }
    }
}

impl ExtJsonOptions {
    /// Plain JSON, no wrapper interpretation
    pub fn plain() -> Self {
        Self { extended: false }
    }
}

/// Convert a JSON object into a document
///
/// Fails if `value` is not an object, or if it is itself an extended JSON
/// wrapper for a non-document value.
pub fn document_from_json(value: JsonValue, options: ExtJsonOptions) -> Result<Document> {
    match value_from_json(value, options)? {
        Value::Document(doc) => Ok(doc),
        other => Err(Error::extended_json(
            "$",
            format!("expected a document, found {}", other.describe()),
        )),
    }
}

/// Convert any JSON value into a document value
pub fn value_from_json(value: JsonValue, options: ExtJsonOptions) -> Result<Value> {
    convert(value, options, "$")
}

fn convert(value: JsonValue, options: ExtJsonOptions, path: &str) -> Result<Value> {
    match value {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Boolean(b)),
        JsonValue::Number(n) => Ok(number_value(&n)),
        JsonValue::String(s) => Ok(Value::String(s)),
        JsonValue::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.into_iter().enumerate() {
                values.push(convert(item, options, &format!("{path}[{i}]"))?);
            }
            Ok(Value::Array(values))
        }
        JsonValue::Object(map) => {
            if options.extended {
                if let Some(value) = wrapper_value(&map, path)? {
                    return Ok(value);
                }
            }

            let mut doc = Document::new();
            for (key, val) in map {
                let child_path = format!("{path}.{key}");
                let converted = convert(val, options, &child_path)?;
                doc.insert(key, converted);
            }
            Ok(Value::Document(doc))
        }
    }
}

/// Map a plain JSON number onto the narrowest matching kind
fn number_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        match i32::try_from(i) {
            Ok(small) => Value::Int32(small),
            Err(_) => Value::Int64(i),
        }
    } else {
        // u64 beyond i64 range, or a float
        Value::Double(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Recognise an extended JSON wrapper object
///
/// Returns `Ok(None)` when the object is an ordinary document.
fn wrapper_value(map: &Map<String, JsonValue>, path: &str) -> Result<Option<Value>> {
    let Some(first) = map.keys().next() else {
        return Ok(None);
    };
    if !first.starts_with('$') || map.len() > 2 {
        return Ok(None);
    }

    let key = first.as_str();
    let inner = &map[key];
    let wrapper_path = format!("{path}.{key}");

    let value = match (key, map.len()) {
        ("$oid", 1) => Value::ObjectId(object_id(inner, &wrapper_path)?),
        ("$date", 1) => Value::DateTime(date_time(inner, &wrapper_path)?),
        ("$numberDecimal", 1) => Value::Decimal128(string_payload(inner, &wrapper_path)?.to_string()),
        ("$numberLong", 1) => {
            let s = string_payload(inner, &wrapper_path)?;
            Value::Int64(s.parse().map_err(|e| {
                Error::extended_json(&wrapper_path, format!("invalid int64 '{s}': {e}"))
            })?)
        }
        ("$numberInt", 1) => {
            let s = string_payload(inner, &wrapper_path)?;
            Value::Int32(s.parse().map_err(|e| {
                Error::extended_json(&wrapper_path, format!("invalid int32 '{s}': {e}"))
            })?)
        }
        ("$numberDouble", 1) => {
            let s = string_payload(inner, &wrapper_path)?;
            Value::Double(s.parse().map_err(|e| {
                Error::extended_json(&wrapper_path, format!("invalid double '{s}': {e}"))
            })?)
        }
        ("$binary", 1) => binary(inner, None, &wrapper_path)?,
        ("$binary", 2) => binary(inner, map.get("$type"), &wrapper_path)?,
        ("$timestamp", 1) => timestamp(inner, &wrapper_path)?,
        ("$undefined" | "$minKey" | "$maxKey" | "$regularExpression" | "$symbol" | "$dbPointer", 1)
        | ("$code", 1 | 2)
        | ("$regex", 2) => Value::Undefined,
        _ => return Ok(None),
    };

    Ok(Some(value))
}

fn string_payload<'a>(value: &'a JsonValue, path: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::extended_json(path, "expected a string payload"))
}

fn object_id(value: &JsonValue, path: &str) -> Result<String> {
    let hex = string_payload(value, path)?;
    if hex.len() != 24 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::extended_json(
            path,
            format!("object id must be 24 hex digits, got '{hex}'"),
        ));
    }
    Ok(hex.to_ascii_lowercase())
}

fn date_time(value: &JsonValue, path: &str) -> Result<DateTime<Utc>> {
    let millis = match value {
        // Relaxed form: ISO-8601 string
        JsonValue::String(s) => {
            return DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| Error::extended_json(path, format!("invalid date '{s}': {e}")));
        }
        // Canonical form: {"$numberLong": "<millis>"}
        JsonValue::Object(inner) => {
            let s = inner
                .get("$numberLong")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::extended_json(path, "expected {\"$numberLong\": ...}"))?;
            s.parse::<i64>()
                .map_err(|e| Error::extended_json(path, format!("invalid millis '{s}': {e}")))?
        }
        JsonValue::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::extended_json(path, "date millis must be an integer"))?,
        _ => return Err(Error::extended_json(path, "unsupported date payload")),
    };

    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::extended_json(path, format!("date out of range: {millis}")))
}

fn binary(value: &JsonValue, legacy_type: Option<&JsonValue>, path: &str) -> Result<Value> {
    let (payload, subtype) = match (value, legacy_type) {
        (JsonValue::Object(inner), None) => (
            inner
                .get("base64")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::extended_json(path, "missing 'base64'"))?,
            inner
                .get("subType")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Error::extended_json(path, "missing 'subType'"))?,
        ),
        (JsonValue::String(payload), Some(JsonValue::String(subtype))) => {
            (payload.as_str(), subtype.as_str())
        }
        _ => return Err(Error::extended_json(path, "unsupported binary payload")),
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::extended_json(path, format!("invalid base64: {e}")))?;
    let subtype = u8::from_str_radix(subtype, 16)
        .map_err(|e| Error::extended_json(path, format!("invalid subtype '{subtype}': {e}")))?;

    Ok(Value::Binary { subtype, bytes })
}

fn timestamp(value: &JsonValue, path: &str) -> Result<Value> {
    let field = |name: &str| -> Result<u32> {
        value
            .get(name)
            .and_then(JsonValue::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| Error::extended_json(path, format!("missing or invalid '{name}'")))
    };

    Ok(Value::Timestamp {
        time: field("t")?,
        increment: field("i")?,
    })
}
