//! Error types and result types for gateway and document store operations.
//!
//! The translation layer never fails; everything here originates either from request
//! validation at the edge or from the store backend. Use [`DocumentStoreResult<T>`] as the
//! return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when serving a request against a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The request is missing something required before the store can be touched,
    /// such as the `collection` parameter.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// No document in the collection matched the given identifier.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl DocumentStoreError {
    /// Shorthand for a [`DocumentStoreError::DocumentNotFound`].
    pub fn not_found(id: impl ToString, collection: impl Into<String>) -> Self {
        DocumentStoreError::DocumentNotFound(id.to_string(), collection.into())
    }
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
