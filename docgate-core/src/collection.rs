//! Collection handles bound to a backend.
//!
//! A [`Collection`] is what request handlers work with: it knows its name and
//! configuration (through a shared [`CollectionHandle`]) and exposes the gateway
//! operations. Raw request input goes in; translation to backend calls happens here.
//!
//! # Example
//!
//! ```ignore
//! use docgate::{params::RawParams, identifier::DocumentId};
//! use serde_json::json;
//!
//! let users = store.collection("users").await;
//!
//! let params: RawParams = [("status", "active,pending"), ("limit", "10")].into_iter().collect();
//! let active = users.find_by_params(&params).await?;
//!
//! let updated = users
//!     .update(&DocumentId::new("u1"), &json!({ "profile": { "name": "Ada" } }))
//!     .await?;
//! ```

use std::sync::Arc;

use bson::Document;
use serde_json::Value;
use tracing::debug;

use crate::{
    backend::StoreBackend,
    error::{DocumentStoreError, DocumentStoreResult},
    flatten::{FlatUpdate, flatten},
    identifier::DocumentId,
    params::RawParams,
    query::Query,
    registry::CollectionHandle,
    translate::translate,
};

/// A named collection with a reference to a storage backend.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the backend reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Collection<'a, B: StoreBackend> {
    handle: Arc<CollectionHandle>,
    backend: &'a B,
}

impl<'a, B: StoreBackend> Collection<'a, B> {
    pub(crate) fn new(handle: Arc<CollectionHandle>, backend: &'a B) -> Self {
        Self { handle, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn handle(&self) -> &CollectionHandle {
        &self.handle
    }

    /// Inserts new documents into the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the backend rejects the insert.
    pub async fn insert(&self, documents: Vec<Document>) -> DocumentStoreResult<()> {
        self.backend
            .insert_documents(documents, &self.handle)
            .await
    }

    /// Returns the documents matching a structured query.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`] if the backend query fails.
    pub async fn find(&self, query: Query) -> DocumentStoreResult<Vec<Document>> {
        self.backend
            .find_documents(query, &self.handle)
            .await
    }

    /// Translates raw query-string parameters and runs the resulting query.
    ///
    /// Reserved parameters (including `collection`) are interpreted or ignored; every
    /// other parameter becomes a filter clause.
    pub async fn find_by_params(&self, params: &RawParams) -> DocumentStoreResult<Vec<Document>> {
        let query = translate(params);

        debug!(
            collection = %self.name(),
            filter = ?query.filter,
            sort = ?query.sort,
            limit = ?query.limit,
            "Translated query parameters"
        );

        self.find(query).await
    }

    /// Partially updates the document identified by `id` with a nested JSON payload.
    ///
    /// Only the leaf paths present in `body` are written; sibling fields in nested
    /// objects are preserved.
    ///
    /// # Errors
    ///
    /// - [`DocumentStoreError::InvalidRequest`] if `body` is not a JSON object
    /// - [`DocumentStoreError::DocumentNotFound`] if no document matches `id`
    /// - any backend error
    pub async fn update(&self, id: &DocumentId, body: &Value) -> DocumentStoreResult<Document> {
        if !body.is_object() {
            return Err(DocumentStoreError::InvalidRequest(
                "update body must be a JSON object".to_string(),
            ));
        }

        self.update_flat(id, flatten(body, "")).await
    }

    /// Applies an already flattened update to the document identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DocumentNotFound`] if no document matches `id`.
    pub async fn update_flat(&self, id: &DocumentId, update: FlatUpdate) -> DocumentStoreResult<Document> {
        debug!(
            collection = %self.name(),
            id = %id,
            fields = update.len(),
            "Updating document"
        );

        self.backend
            .find_one_and_update(id, update, &self.handle)
            .await?
            .ok_or_else(|| DocumentStoreError::not_found(id, self.name()))
    }

    /// Deletes the document identified by `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DocumentNotFound`] if no document matches `id`.
    pub async fn delete(&self, id: &DocumentId) -> DocumentStoreResult<Document> {
        debug!(collection = %self.name(), id = %id, "Deleting document");

        self.backend
            .find_one_and_delete(id, &self.handle)
            .await?
            .ok_or_else(|| DocumentStoreError::not_found(id, self.name()))
    }
}
