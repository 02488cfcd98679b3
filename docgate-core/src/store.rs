//! Main document store interface.
//!
//! - [`DocumentStore`] - store bound to a concrete backend type
//! - [`DynDocumentStore`] - store over a boxed backend chosen at runtime
//!
//! # Example
//!
//! ```ignore
//! use docgate::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let users = store.collection("users").await;
//! ```

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    collection::Collection,
    config::CollectionConfigs,
    error::DocumentStoreResult,
    registry::CollectionRegistry,
};

/// A document store bound to a specific backend implementation.
///
/// Collections are resolved by name through an internal [`CollectionRegistry`], so the
/// per-collection configuration is looked up once per name for the lifetime of the store.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
    registry: CollectionRegistry,
}

/// A document store whose backend is selected at runtime.
pub type DynDocumentStore = DocumentStore<Box<dyn DynStoreBackend>>;

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the default collection configuration table.
    pub fn new(backend: B) -> Self {
        Self::with_configs(backend, CollectionConfigs::default())
    }

    /// Creates a new document store with a custom collection configuration table.
    pub fn with_configs(backend: B, configs: CollectionConfigs) -> Self {
        Self {
            backend,
            registry: CollectionRegistry::new(configs),
        }
    }

    /// Gets the collection with the given name.
    pub async fn collection<'a>(&'a self, name: &str) -> Collection<'a, B> {
        Collection::new(self.registry.handle(name).await, &self.backend)
    }

    /// Lists all collections in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    pub async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        StoreBackend::list_collections(&self.backend).await
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    /// Shuts down the backend.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(self.backend).await
    }
}

impl<B: StoreBackend + 'static> DocumentStore<B> {
    /// Converts this store into a [`DynDocumentStore`], keeping its collection registry.
    pub fn into_dyn(self) -> DynDocumentStore {
        DocumentStore {
            backend: Box::new(self.backend) as Box<dyn DynStoreBackend>,
            registry: self.registry,
        }
    }
}
