//! Opaque document identifiers taken from request paths.
//!
//! The gateway never knows how a collection stores its `_id`. An identifier is kept as
//! the raw string the caller sent and expanded into the typed candidates a stored `_id`
//! may legitimately equal, according to the collection's [`IdMode`].

use std::fmt;

use bson::{Bson, oid::ObjectId};

use crate::{coerce::infer_value, config::IdMode};

/// Name of the identifier field in stored documents.
pub const ID_FIELD: &str = "_id";

/// A document identifier exactly as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Every stored `_id` value this identifier should match, raw string first.
    ///
    /// - [`IdMode::String`]: only the raw string.
    /// - [`IdMode::Flexible`]: the raw string, its integer reading when it has one,
    ///   and the ObjectId it spells when it is a 24 digit hex string. Fractional or
    ///   exponent forms like `1.0` stay strings, so they never alias an integer `_id`.
    pub fn candidates(&self, mode: IdMode) -> Vec<Bson> {
        let mut candidates = vec![Bson::String(self.0.clone())];

        if mode == IdMode::String {
            return candidates;
        }

        let inferred = infer_value(&self.0);
        if matches!(inferred, Bson::Int64(_)) {
            candidates.push(inferred);
        }

        if let Ok(oid) = ObjectId::parse_str(&self.0) {
            candidates.push(Bson::ObjectId(oid));
        }

        candidates
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for DocumentId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
