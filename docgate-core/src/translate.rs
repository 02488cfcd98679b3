//! Translation of a raw query-string parameter set into a [`Query`].
//!
//! Reserved parameters (see [`crate::params::RESERVED`]) control the limit and sort;
//! every other parameter becomes one filter clause:
//!
//! | Parameter | Clause |
//! |-----------|--------|
//! | `field__exists=true` | `field` exists |
//! | `field__exists=<anything else>` | `field` does not exist |
//! | `field=v` | `field == infer(v)` |
//! | `field=v1,v2,...` | `field in [infer(v1), infer(v2), ...]` |
//!
//! Field names are passed through untouched; nothing is validated against a schema.

use crate::{
    coerce::infer_value,
    params::{self, RawParams},
    query::{Expr, Filter, Query, SortDirection},
};

/// Limit applied when the `limit` parameter is missing or not an integer.
pub const DEFAULT_LIMIT: usize = 50;

/// Key suffix turning a parameter into an existence check.
pub const EXISTS_SUFFIX: &str = "__exists";

/// Builds the filter, sort and limit described by `params`.
///
/// Never fails: a malformed `limit` falls back to [`DEFAULT_LIMIT`] and any other
/// parameter is accepted as a filter. The `collection` parameter is ignored here; the
/// caller is responsible for rejecting requests that lack it.
pub fn translate(params: &RawParams) -> Query {
    let mut builder = Query::builder().limit(resolve_limit(params.get(params::LIMIT)));

    if let Some(field) = params.get(params::SORT_BY).filter(|field| !field.is_empty()) {
        builder = builder.sort(
            field,
            SortDirection::from_order(params.get(params::SORT_ORDER)),
        );
    }

    if let Some(filter) = translate_filter(params) {
        builder = builder.filter(filter);
    }

    builder.build()
}

/// Builds only the filter part of [`translate`], `None` when there is nothing to filter on.
pub fn translate_filter(params: &RawParams) -> Option<Expr> {
    let mut clauses: Vec<Expr> = Vec::new();

    for (key, value) in params.iter().filter(|(key, _)| !params::is_reserved(key)) {
        let clause = translate_clause(key, value);

        // Two parameters aimed at the same field: the later one replaces the earlier.
        match clauses
            .iter_mut()
            .find(|existing| existing.target_field() == clause.target_field())
        {
            Some(slot) => *slot = clause,
            None => clauses.push(clause),
        }
    }

    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(Expr::And(clauses)),
    }
}

/// Translates one non-reserved parameter into a filter clause.
pub fn translate_clause(key: &str, value: &str) -> Expr {
    if let Some(field) = key.strip_suffix(EXISTS_SUFFIX) {
        return Expr::Exists(field.to_string(), value == "true");
    }

    let mut values = value.split(',').map(infer_value).collect::<Vec<_>>();

    if values.len() == 1 {
        Filter::eq(key, values.remove(0))
    } else {
        Filter::is_in(key, values)
    }
}

/// Parses the `limit` parameter, falling back to [`DEFAULT_LIMIT`].
pub fn resolve_limit(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_LIMIT)
}
