//! Query representation shared by the translator and the store backends.
//!
//! A [`Query`] is what the HTTP read path hands to a backend: an optional filter
//! expression, an optional single-field sort and a limit. Backends consume the filter
//! through the [`QueryVisitor`] trait, so each one decides how an expression is
//! evaluated (in process, or translated into a native query document).
//!
//! # Query Building
//!
//! ```ignore
//! use docgate::query::{Query, Filter, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("status", "active").and(Filter::exists("email")))
//!     .limit(10)
//!     .sort("age", SortDirection::Desc)
//!     .build();
//! ```
//!
//! # Filter Expression API
//!
//! - Equality: `eq`
//! - Membership: `is_in`
//! - Existence: `exists`, `not_exists`
//! - Logical: `and`

use bson::Bson;

use crate::error::DocumentStoreError;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

impl SortDirection {
    /// Resolves a user supplied order string.
    ///
    /// Only `desc` (in any case) selects descending order; anything else, including
    /// unrecognized words, falls back to ascending.
    pub fn from_order(order: Option<&str>) -> Self {
        match order {
            Some(order) if order.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Sort specification for query results.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Equal to (exact match, or membership when the stored field is an array).
    Eq,
    /// Equal to one of the values in the array operand.
    In,
}

/// A filter expression for querying documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Checks if a field exists or doesn't exist.
    Exists(String, bool),
    /// Field comparison expression.
    Field {
        /// The field name to compare. May be a dotted path.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Returns the field a leaf expression constrains, or `None` for an AND.
    pub fn target_field(&self) -> Option<&str> {
        match self {
            Expr::And(_) => None,
            Expr::Exists(field, _) => Some(field),
            Expr::Field { field, .. } => Some(field),
        }
    }
}

/// A structured query for retrieving and filtering documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Maximum number of documents to return. `Some(0)` means no limit.
    pub limit: Option<usize>,
    /// Sort specification for results.
    pub sort: Option<Sort>,
}

impl Query {
    /// Creates a new empty query with no filters or limits.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// The effective number of documents to return, `None` when unbounded.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|limit| *limit > 0)
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the specified value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Matches documents where the field equals any of the specified values.
    pub fn is_in<V: Into<Bson>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Expr {
        Expr::field(
            field.into(),
            FieldOp::In,
            Bson::Array(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Matches documents where the field is present.
    pub fn exists(field: impl Into<String>) -> Expr {
        Expr::Exists(field.into(), true)
    }

    /// Matches documents where the field is absent.
    pub fn not_exists(field: impl Into<String>) -> Expr {
        Expr::Exists(field.into(), false)
    }

    /// Combines multiple expressions such that all must match for a document to be included.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the sort specification for the query results.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort = Some(Sort { field: field.into(), direction });
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_exists(
        &mut self,
        field: &str,
        should_exist: bool,
    ) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Exists(field, should_exist) => self.visit_exists(field, *should_exist),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_only_desc_is_descending() {
        assert_eq!(SortDirection::from_order(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::from_order(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::from_order(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::from_order(Some("up")), SortDirection::Asc);
        assert_eq!(SortDirection::from_order(None), SortDirection::Asc);
    }

    #[test]
    fn and_flattens_into_existing_list() {
        let expr = Filter::eq("a", 1).and(Filter::exists("b")).and(Filter::not_exists("c"));

        match expr {
            Expr::And(list) => assert_eq!(list.len(), 3),
            other => panic!("expected AND, got {other:?}"),
        }
    }

    #[test]
    fn zero_limit_is_unbounded() {
        assert_eq!(Query::builder().limit(0).build().effective_limit(), None);
        assert_eq!(Query::builder().limit(5).build().effective_limit(), Some(5));
        assert_eq!(Query::new().effective_limit(), None);
    }
}
