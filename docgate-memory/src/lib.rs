//! In-memory document storage backend for docgate.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is ideal for development,
//! testing, and small deployments.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Schema-less storage** - Documents are stored as BSON as they were written
//! - **Full query support** - Equality, set membership, existence, sorting and limits
//! - **Flexible identifiers** - `_id` matching follows the collection's identifier mode
//!
//! # Quick Start
//!
//! ```ignore
//! use docgate::{DocumentStore, identifier::DocumentId, memory::InMemoryStore};
//! use bson::doc;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder()
//!         .with_documents("users", vec![doc! { "_id": "u1", "name": "Alice" }])
//!         .build()
//!         .await?;
//!     let store = DocumentStore::new(backend);
//!
//!     let users = store.collection("users").await;
//!     users.update(&DocumentId::new("u1"), &json!({ "name": "Ada" })).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docgate_memory;

pub mod store;
mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
