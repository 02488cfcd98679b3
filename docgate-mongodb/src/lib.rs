//! MongoDB backend implementation for docgate.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! running the gateway's filters, sorts and partial updates on MongoDB's query engine.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docgate = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Persistent storage** - Data is persisted to MongoDB Atlas or self-hosted MongoDB
//! - **Native queries** - Filters translate to `$eq`, `$in`, `$exists` and `$and`
//! - **Partial updates** - Flattened updates are applied atomically with `$set`
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//!
//! # Example
//!
//! ```ignore
//! use docgate::{backend::StoreBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "my_database")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docgate_mongodb;

pub mod store;
mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
