//! Main docgate crate providing a unified interface to the gateway engine.
//!
//! This crate is the primary entry point for users of docgate. It re-exports the core
//! types and functionality from the sub-crates and provides access to the storage backends.
//!
//! # Features
//!
//! - **Query translation** - Raw query-string parameters become filter, sort and limit
//! - **Partial updates** - Nested JSON payloads are flattened into dotted field paths
//! - **Opaque identifiers** - `_id` values are matched per collection configuration
//! - **Multiple backends** - In-memory and MongoDB storage behind one backend trait
//!
//! # Quick Start
//!
//! ```ignore
//! use docgate::{prelude::*, memory::InMemoryStore};
//! use bson::doc;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = InMemoryStore::builder()
//!         .with_documents("users", vec![
//!             doc! { "_id": "u1", "name": "Alice", "status": "active" },
//!             doc! { "_id": "u2", "name": "Bob", "status": "pending" },
//!         ])
//!         .build()
//!         .await
//!         .unwrap();
//!     let store = DocumentStore::new(backend);
//!     let users = store.collection("users").await;
//!
//!     // GET /api/data?collection=users&status=active,pending&sortBy=name&sortOrder=desc
//!     let params: RawParams = [
//!         ("collection", "users"),
//!         ("status", "active,pending"),
//!         ("sortBy", "name"),
//!         ("sortOrder", "desc"),
//!     ]
//!     .into_iter()
//!     .collect();
//!
//!     let results = users.find_by_params(&params).await.unwrap();
//!     println!("Queried users: {:?}", results);
//!
//!     // PUT /api/data/u1?collection=users
//!     users
//!         .update(&DocumentId::new("u1"), &json!({ "profile": { "city": "Oslo" } }))
//!         .await
//!         .unwrap();
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A typed `DocumentStore` converts into a [`store::DynDocumentStore`] with `into_dyn`, so
//! the backend can be picked at runtime (for example from configuration) while request
//! handlers keep working against a single store type.
//!
//! ```ignore
//! use docgate::{prelude::*, memory::InMemoryStore};
//!
//! let store: DynDocumentStore = DocumentStore::new(InMemoryStore::new()).into_dyn();
//! let users = store.collection("users").await;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing
//! - `mongodb` - Persistent MongoDB backend (requires `mongodb` feature)

pub mod prelude;

pub use docgate_core::{
    backend, coerce, collection, config, error, flatten, identifier, params, query, registry,
    store, translate,
};

// Re-export BSON and JSON types for convenience
pub use bson;
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docgate_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docgate_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
