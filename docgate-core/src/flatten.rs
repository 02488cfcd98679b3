//! Normalization of nested JSON update payloads into flat field-path updates.
//!
//! A partial update must only touch the fields present in the payload. Sending the
//! nested object as-is would replace whole sub-documents, so the payload is flattened
//! into `dot.joined.path -> value` pairs first. Objects are recursed into; arrays and
//! scalars are leaves.
//!
//! ```ignore
//! use docgate::flatten::flatten;
//! use serde_json::json;
//!
//! let update = flatten(&json!({ "a": { "b": 1, "c": [1, 2] }, "d": "x" }), "");
//! // a.b => 1, a.c => [1, 2], d => "x"
//! ```

use bson::{Bson, Document, ser::serialize_to_bson};
use serde_json::{Map, Value};

use crate::error::DocumentStoreResult;

/// A single-level, ordered mapping from full dot path to leaf value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatUpdate {
    entries: Vec<(String, Value)>,
}

impl FlatUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == path)
            .map(|(_, value)| value)
    }

    /// Iterates over `(path, value)` pairs in payload order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts the update into a BSON document suitable for a `$set` instruction.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a leaf cannot be represented as BSON.
    pub fn to_document(&self) -> DocumentStoreResult<Document> {
        let mut document = Document::new();

        for (path, value) in &self.entries {
            document.insert(path.clone(), serialize_to_bson(value)?);
        }

        Ok(document)
    }

    /// Converts the update into `(path, bson)` pairs.
    pub fn to_bson_entries(&self) -> DocumentStoreResult<Vec<(String, Bson)>> {
        self.entries
            .iter()
            .map(|(path, value)| Ok((path.clone(), serialize_to_bson(value)?)))
            .collect()
    }

    fn push(&mut self, path: String, value: Value) {
        self.entries.push((path, value));
    }
}

impl From<FlatUpdate> for Map<String, Value> {
    fn from(update: FlatUpdate) -> Self {
        update.entries.into_iter().collect()
    }
}

/// Flattens `node` below `prefix` (empty at the top-level call).
pub fn flatten(node: &Value, prefix: &str) -> FlatUpdate {
    let mut update = FlatUpdate::new();
    flatten_into(node, prefix, &mut update);
    update
}

fn flatten_into(node: &Value, prefix: &str, update: &mut FlatUpdate) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                flatten_into(child, &path, update);
            }
        }
        // Arrays are stored whole; their elements are not addressed individually.
        leaf => update.push(prefix.to_string(), leaf.clone()),
    }
}

/// Rebuilds a nested object from a flat update by splitting each path on `.`.
///
/// Inverse of [`flatten`] for payloads whose keys contain no dots and that hold no
/// empty nested objects. When a path runs through a non-object value, the value is
/// replaced by an object.
pub fn expand(update: &FlatUpdate) -> Value {
    let mut root = Map::new();

    for (path, value) in update.iter() {
        insert_path(&mut root, path, value.clone());
    }

    Value::Object(root)
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }

        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }

        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
}
