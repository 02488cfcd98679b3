//! HTTP request handlers.
//!
//! - [`data`] - Query, update and delete against a named collection
//! - [`health`] - Liveness endpoint

pub mod data;
pub mod health;

pub use data::{delete_handler, list_handler, update_handler};
pub use health::health_handler;
