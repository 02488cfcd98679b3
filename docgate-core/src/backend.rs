//! Storage backend abstraction for the gateway.
//!
//! This module defines the traits that abstract over the document store collaborator,
//! allowing the gateway to run against different backends (in-memory, MongoDB).
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface for the operations the
//! gateway needs against a named collection: filtered reads, single-document partial
//! updates and deletes by identifier, plus bulk insertion for seeding.
//! Implementations are required to be thread-safe (`Send + Sync`).
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use docgate::backend::StoreBackend;
//! use docgate::query::Query;
//! use docgate::registry::CollectionHandle;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! let users = CollectionHandle::new("users", Default::default());
//!
//! backend.insert_documents(vec![doc! { "_id": "u1", "name": "Alice" }], &users).await?;
//! let found = backend.find_documents(Query::new(), &users).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::{
    error::DocumentStoreResult,
    flatten::FlatUpdate,
    identifier::DocumentId,
    query::Query,
    registry::CollectionHandle,
};

/// Abstract interface for document storage backends.
///
/// Every operation receives the [`CollectionHandle`] it applies to; the handle carries the
/// collection name and its configuration (for example how identifiers are matched, see
/// [`crate::identifier::DocumentId::candidates`]).
///
/// # Error Handling
///
/// Failures of the underlying store are reported as
/// [`DocumentStoreError::Backend`](crate::error::DocumentStoreError::Backend) with the
/// driver's message. A missing document is *not* an error at this level; the single
/// document operations return `Ok(None)` instead.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Short, human-readable backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Inserts new documents into a collection, creating it if needed.
    ///
    /// Documents without an `_id` are given one by the backend.
    async fn insert_documents(
        &self,
        documents: Vec<Document>,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<()>;

    /// Returns the documents matching the query's filter, sorted and limited as requested.
    ///
    /// A collection that does not exist yields an empty result.
    async fn find_documents(
        &self,
        query: Query,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Vec<Document>>;

    /// Applies `update` as a field-path `$set` to the first document whose `_id` matches `id`
    /// and returns the document as it is after the update.
    ///
    /// An empty update leaves the document untouched and returns it as stored.
    /// Returns `Ok(None)` when no document matches.
    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Removes the first document whose `_id` matches `id` and returns it.
    ///
    /// Returns `Ok(None)` when no document matches.
    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>>;

    /// Lists the names of all collections in the store.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    fn backend_name(&self) -> &'static str;
    async fn insert_documents(
        &self,
        documents: Vec<Document>,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<()>;
    async fn find_documents(
        &self,
        query: Query,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Vec<Document>>;
    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>>;
    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>>;
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;
}

#[async_trait]
impl<B: StoreBackend + Send + Sync + 'static> DynStoreBackend for B {
    fn backend_name(&self) -> &'static str {
        StoreBackend::backend_name(self)
    }

    async fn insert_documents(
        &self,
        documents: Vec<Document>,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<()> {
        StoreBackend::insert_documents(self, documents, collection)
            .await
    }

    async fn find_documents(
        &self,
        query: Query,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::find_documents(self, query, collection)
            .await
    }

    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::find_one_and_update(self, id, update, collection)
            .await
    }

    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::find_one_and_delete(self, id, collection)
            .await
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        StoreBackend::list_collections(self).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(*self).await
    }
}

/// A boxed backend is itself a backend, so a store can pick its backend at runtime.
#[async_trait]
impl StoreBackend for Box<dyn DynStoreBackend> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn insert_documents(
        &self,
        documents: Vec<Document>,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<()> {
        (**self)
            .insert_documents(documents, collection)
            .await
    }

    async fn find_documents(
        &self,
        query: Query,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Vec<Document>> {
        (**self)
            .find_documents(query, collection)
            .await
    }

    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        (**self)
            .find_one_and_update(id, update, collection)
            .await
    }

    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        (**self)
            .find_one_and_delete(id, collection)
            .await
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        (**self).list_collections().await
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.shutdown_boxed().await
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
