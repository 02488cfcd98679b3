//! Query expression evaluation for in-memory document filtering.
//!
//! This module provides the evaluation engine for query expressions, enabling filtering,
//! identifier matching and ordering of BSON documents with MongoDB-like semantics:
//! dotted field paths reach into sub-documents, equality against an array field matches
//! any element, and mixed types sort by type before value.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, Document, datetime::DateTime, oid::ObjectId};

use docgate_core::{
    error::DocumentStoreError,
    identifier::ID_FIELD,
    query::{Expr, FieldOp, QueryVisitor, SortDirection},
};

/// Type-erased, comparable representation of BSON values.
///
/// Numeric types are normalized to `f64`, so `Int32(1)`, `Int64(1)` and `Double(1.0)`
/// compare equal.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null value, also used for missing fields and unsupported types
    Null,
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// String value
    String(&'a str),
    /// Map/Object of comparable values
    Map(HashMap<&'a str, Comparable<'a>>),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// ObjectId value
    ObjectId(ObjectId),
    /// Boolean value
    Bool(bool),
    /// DateTime value
    DateTime(DateTime),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            _ => Comparable::Null, // Other types are not comparable
        }
    }
}

impl<'a> Comparable<'a> {
    /// Position of the value's type in the cross-type sort order.
    fn type_rank(&self) -> u8 {
        match self {
            Comparable::Null => 0,
            Comparable::Number(_) => 1,
            Comparable::String(_) => 2,
            Comparable::Map(_) => 3,
            Comparable::Array(_) => 4,
            Comparable::ObjectId(_) => 5,
            Comparable::Bool(_) => 6,
            Comparable::DateTime(_) => 7,
        }
    }

    /// Total ordering used for sorting: type rank first, then value.
    pub(crate) fn sort_cmp(&self, other: &Self) -> Ordering {
        self.type_rank()
            .cmp(&other.type_rank())
            .then_with(|| self.partial_cmp(other).unwrap_or(Ordering::Equal))
    }

    /// MongoDB equality: equal values, or an array field holding the value.
    pub(crate) fn matches(&self, value: &Comparable<'_>) -> bool {
        if self == value {
            return true;
        }

        match self {
            Comparable::Array(items) => items.iter().any(|item| item == value),
            _ => false,
        }
    }
}

impl<'a, 'b> PartialEq<Comparable<'b>> for Comparable<'a> {
    fn eq(&self, other: &Comparable<'b>) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (Comparable::Map(a), Comparable::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, x)| b.get(*key).is_some_and(|y| x == y))
            }
            _ => false,
        }
    }
}

impl<'a, 'b> PartialOrd<Comparable<'b>> for Comparable<'a> {
    fn partial_cmp(&self, other: &Comparable<'b>) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Resolves a possibly dotted field path to a single value, for ordering.
///
/// A key that literally contains the dots wins over traversal. Arrays end the
/// traversal; filters go through [`resolve`] instead.
pub(crate) fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    if let Some(value) = document.get(path) {
        return Some(value);
    }

    let (head, rest) = path.split_once('.')?;

    match document.get(head)? {
        Bson::Document(inner) => lookup(inner, rest),
        _ => None,
    }
}

/// Collects every value a dotted path reaches inside a document.
///
/// Unlike [`lookup`], traversal fans out over arrays: a segment following an array
/// is applied to each sub-document element, and a numeric segment also selects the
/// element at that position.
pub(crate) fn resolve<'a>(document: &'a Document, path: &str) -> Vec<&'a Bson> {
    let mut found = Vec::new();
    collect_path(document, path, &mut found);
    found
}

fn collect_path<'a>(document: &'a Document, path: &str, found: &mut Vec<&'a Bson>) {
    if let Some(value) = document.get(path) {
        found.push(value);
        return;
    }

    let Some((head, rest)) = path.split_once('.') else {
        return;
    };

    match document.get(head) {
        Some(Bson::Document(inner)) => collect_path(inner, rest, found),
        Some(Bson::Array(items)) => {
            let (segment, tail) = rest
                .split_once('.')
                .map_or((rest, None), |(segment, tail)| (segment, Some(tail)));

            if let Some(item) = segment.parse::<usize>().ok().and_then(|index| items.get(index)) {
                match (tail, item) {
                    (None, value) => found.push(value),
                    (Some(tail), Bson::Document(inner)) => collect_path(inner, tail, found),
                    _ => {}
                }
            }

            for item in items {
                if let Bson::Document(inner) = item {
                    collect_path(inner, rest, found);
                }
            }
        }
        _ => {}
    }
}

/// Returns `true` if the document's `_id` equals any of the candidates.
pub(crate) fn matches_id(document: &Document, candidates: &[Bson]) -> bool {
    document
        .get(ID_FIELD)
        .map(Comparable::from)
        .is_some_and(|id| {
            candidates
                .iter()
                .any(|candidate| id == Comparable::from(candidate))
        })
}

/// Orders two documents by `field`, missing values first in ascending order.
pub(crate) fn compare_by(a: &Document, b: &Document, field: &str, direction: SortDirection) -> Ordering {
    let left = lookup(a, field)
        .map(Comparable::from)
        .unwrap_or(Comparable::Null);
    let right = lookup(b, field)
        .map(Comparable::from)
        .unwrap_or(Comparable::Null);

    match direction {
        SortDirection::Asc => left.sort_cmp(&right),
        SortDirection::Desc => right.sort_cmp(&left),
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<bool, DocumentStoreError> {
        self.visit_expr(expr)
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        expr: &Expr,
    ) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|doc| {
                DocumentEvaluator::new(doc)
                    .evaluate(expr)
                    .unwrap_or(false)
            })
            .cloned()
            .collect::<Vec<_>>()
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(!resolve(self.document, field).is_empty() == should_exist)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let found = resolve(self.document, field)
            .into_iter()
            .map(Comparable::from)
            .collect::<Vec<_>>();
        let any_matches = |candidate: &Bson| {
            let candidate = Comparable::from(candidate);
            found.iter().any(|field_value| field_value.matches(&candidate))
        };

        match op {
            FieldOp::Eq => Ok(any_matches(value)),
            FieldOp::In => match value {
                Bson::Array(values) => Ok(values.iter().any(any_matches)),
                _ => Err(DocumentStoreError::Backend("In operator requires an array value".to_string())),
            },
        }
    }
}
