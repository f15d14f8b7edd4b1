//! JSON document source
//!
//! Reads a stream of concatenated JSON values: a single document, JSON
//! Lines, a top-level array, or any mix of those.

use super::types::{DocumentSource, JsonSourceConfig};
use crate::document::{document_from_json, Document};
use crate::error::{Error, Result};
use serde_json::de::IoRead;
use serde_json::{Deserializer, StreamDeserializer, Value as JsonValue};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Streaming JSON document source
pub struct JsonSource<R: Read> {
    stream: StreamDeserializer<'static, IoRead<R>, JsonValue>,
    config: JsonSourceConfig,
    /// Extracted values waiting to be converted
    pending: VecDeque<JsonValue>,
    /// Documents handed out so far
    ordinal: usize,
}

impl<R: Read> JsonSource<R> {
    /// Read documents from any reader
    pub fn new(reader: R, config: JsonSourceConfig) -> Self {
        Self {
            stream: Deserializer::from_reader(reader).into_iter(),
            config,
            pending: VecDeque::new(),
            ordinal: 0,
        }
    }

    /// Documents handed out so far
    pub fn documents_read(&self) -> usize {
        self.ordinal
    }

    fn extract(&self, value: JsonValue) -> Result<Vec<JsonValue>> {
        match &self.config.record_path {
            Some(path) => {
                // jsonpath-rust only for wildcard paths; dot paths stay simple
                let found = if path.contains('*') {
                    extract_with_jsonpath(&value, path)?
                } else {
                    extract_simple_path(&value, path).map_or_else(Vec::new, |v| vec![v])
                };
                Ok(found.into_iter().flat_map(flatten_array).collect())
            }
            None if self.config.unwrap_arrays => Ok(flatten_array(value)),
            None => Ok(vec![value]),
        }
    }

    fn convert(&self, value: JsonValue) -> Result<Document> {
        if !value.is_object() {
            return Err(Error::source_read(
                self.ordinal,
                format!("expected a JSON object, found {}", json_kind(&value)),
            ));
        }
        document_from_json(value, self.config.ext_json)
            .map_err(|e| Error::source_read(self.ordinal, e.to_string()))
    }
}

impl JsonSource<BufReader<File>> {
    /// Open a JSON file
    pub fn open(path: impl AsRef<Path>, config: JsonSourceConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Ok(Self::new(BufReader::new(file), config))
    }
}

impl JsonSource<BufReader<io::Stdin>> {
    /// Read documents from standard input
    pub fn stdin(config: JsonSourceConfig) -> Self {
        Self::new(BufReader::new(io::stdin()), config)
    }
}

impl<R: Read> DocumentSource for JsonSource<R> {
    fn next_document(&mut self) -> Result<Option<Document>> {
        loop {
            if let Some(value) = self.pending.pop_front() {
                self.ordinal += 1;
                return self.convert(value).map(Some);
            }

            match self.stream.next() {
                None => return Ok(None),
                Some(Err(e)) => {
                    return Err(Error::source_read(
                        self.ordinal + 1,
                        format!("invalid JSON: {e}"),
                    ))
                }
                Some(Ok(value)) => {
                    let extracted = self.extract(value)?;
                    if extracted.is_empty() {
                        tracing::warn!("Top-level value contained no documents");
                    }
                    self.pending.extend(extracted);
                }
            }
        }
    }
}

fn flatten_array(value: JsonValue) -> Vec<JsonValue> {
    match value {
        JsonValue::Array(items) => items,
        other => vec![other],
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Follow a dot path such as `data.items` or `$.pages[0].rows`
fn extract_simple_path(value: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value.clone());
    }

    let mut current = value;
    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].trim_end_matches(']');

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index: i64 = index_str.parse().ok()?;
            let items = current.as_array()?;
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_possible_wrap
            )]
            let idx = if index < 0 {
                (items.len() as i64 + index) as usize
            } else {
                index as usize
            };
            current = items.get(idx)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

fn extract_with_jsonpath(value: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        JsonValue::Array(found) => Ok(found),
        JsonValue::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
