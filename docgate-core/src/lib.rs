//! Core of the docgate project: a query/update translation engine over schema-less
//! document collections.
//!
//! This crate provides:
//!
//! - **Raw parameters** ([`params`]) - The ordered query-string parameter set and its reserved keys
//! - **Type coercion** ([`coerce`]) - Best-effort typing of raw string literals
//! - **Query translation** ([`translate`]) - Raw parameters into filter, sort and limit
//! - **Update normalization** ([`flatten`]) - Nested JSON payloads into flat field-path updates
//! - **Query API** ([`query`]) - The filter expression tree and its visitor
//! - **Identifiers** ([`identifier`]) - Opaque, type-preserving document identifiers
//! - **Collection configuration** ([`config`], [`registry`]) - Per-collection settings and handle cache
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Collections and store** ([`collection`], [`store`]) - High-level API used by request handlers
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use docgate::{params::RawParams, translate::translate};
//!
//! let params: RawParams = [
//!     ("collection", "users"),
//!     ("status", "active,pending"),
//!     ("deletedAt__exists", "false"),
//!     ("sortBy", "age"),
//!     ("sortOrder", "desc"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let query = translate(&params);
//! assert_eq!(query.limit, Some(50));
//! ```

#[allow(unused_extern_crates)]
extern crate self as docgate_core;

pub mod backend;
pub mod coerce;
pub mod collection;
pub mod config;
pub mod error;
pub mod flatten;
pub mod identifier;
pub mod params;
pub mod query;
pub mod registry;
pub mod store;
pub mod translate;
