//! In-memory storage implementation for document stores.
//!
//! Documents are kept per collection in insertion order, which doubles as the natural
//! order reads fall back to when no sort is requested.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, Document, oid::ObjectId};
use tracing::debug;

use docgate_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    flatten::FlatUpdate,
    identifier::{DocumentId, ID_FIELD},
    query::Query,
    registry::CollectionHandle,
};

use crate::evaluator::{DocumentEvaluator, compare_by, matches_id};

type StoreMap = HashMap<String, Vec<Document>>;


/// Thread-safe in-memory document storage backend.
///
/// This struct implements the [`StoreBackend`] trait to provide a fully functional
/// document store that operates entirely in memory using async-aware read-write locks.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Performance
///
/// Queries scan all documents in a collection (no indexing). For small to medium
/// datasets this is typically acceptable. For larger datasets, use the MongoDB backend.
///
/// # Example
///
/// ```ignore
/// use docgate_memory::InMemoryStore;
/// use docgate::{backend::StoreBackend, query::Query, registry::CollectionHandle};
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let users = CollectionHandle::new("users", Default::default());
///
/// store.insert_documents(vec![doc! { "_id": "u1", "name": "Alice" }], &users).await?;
/// let docs = store.find_documents(Query::new(), &users).await?;
/// assert_eq!(docs.len(), 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    ///
    /// ```ignore
    /// let store = InMemoryStore::builder()
    ///     .with_documents("users", vec![doc! { "_id": "u1" }])
    ///     .build()
    ///     .await?;
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

/// Whether an update path targets the identifier or anything nested under it.
fn touches_id(path: &str) -> bool {
    path == ID_FIELD
        || path
            .strip_prefix(ID_FIELD)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Writes `value` at a dotted `path`, creating missing sub-documents on the way.
///
/// Fails when an intermediate segment holds something other than a document.
fn set_path(document: &mut Document, path: &str, value: Bson) -> DocumentStoreResult<()> {
    let Some((head, rest)) = path.split_once('.') else {
        document.insert(path, value);
        return Ok(());
    };

    let next = document
        .entry(head.to_string())
        .or_insert_with(|| Bson::Document(Document::new()));

    match next {
        Bson::Document(inner) => set_path(inner, rest, value),
        other => Err(DocumentStoreError::Backend(format!(
            "Cannot create field '{rest}' in element {{{head}: {other}}}"
        ))),
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_documents(&self, documents: Vec<Document>, collection: &CollectionHandle) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let stored = store
            .entry(collection.name().to_string())
            .or_default();

        for mut document in documents {
            match document.get(ID_FIELD) {
                Some(id) => {
                    if stored.iter().any(|existing| matches_id(existing, std::slice::from_ref(id))) {
                        return Err(DocumentStoreError::Backend(format!(
                            "Duplicate key {id} in collection {}",
                            collection.name(),
                        )));
                    }
                }
                None => {
                    document.insert(ID_FIELD, ObjectId::new());
                }
            }

            stored.push(document);
        }

        Ok(())
    }

    async fn find_documents(&self, query: Query, collection: &CollectionHandle) -> DocumentStoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let stored = match store.get(collection.name()) {
            Some(docs) => docs,
            None => return Ok(vec![]),
        };

        // Apply filter expressions if present
        let mut documents = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(stored.iter(), filter),
            None => stored.clone(),
        };

        // Stable sort keeps insertion order among equal keys
        if let Some(sort) = &query.sort {
            documents.sort_by(|a, b| compare_by(a, b, &sort.field, sort.direction));
        }

        if let Some(limit) = query.effective_limit() {
            documents.truncate(limit);
        }

        debug!(
            collection = %collection.name(),
            returned = documents.len(),
            "Evaluated query in memory"
        );

        Ok(documents)
    }

    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        let candidates = id.candidates(collection.id_mode());
        let entries = update.to_bson_entries()?;

        let mut store = self.store.write().await;
        let Some(stored) = store.get_mut(collection.name()) else {
            return Ok(None);
        };
        let Some(document) = stored.iter_mut().find(|doc| matches_id(doc, &candidates)) else {
            return Ok(None);
        };

        if let Some((path, _)) = entries.iter().find(|(path, _)| touches_id(path)) {
            return Err(DocumentStoreError::Backend(format!(
                "Performing an update on the path '{path}' would modify the immutable field '{ID_FIELD}'"
            )));
        }

        // Work on a copy so a failing path leaves the stored document untouched
        let mut updated = document.clone();

        for (path, value) in entries {
            set_path(&mut updated, &path, value)?;
        }

        *document = updated.clone();

        Ok(Some(updated))
    }

    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        let candidates = id.candidates(collection.id_mode());

        let mut store = self.store.write().await;
        let Some(stored) = store.get_mut(collection.name()) else {
            return Ok(None);
        };

        Ok(
            stored
                .iter()
                .position(|doc| matches_id(doc, &candidates))
                .map(|index| stored.remove(index))
        )
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        let mut names = self.store
            .read()
            .await
            .keys()
            .cloned()
            .collect::<Vec<_>>();

        names.sort();

        Ok(names)
    }
}


/// Builder for constructing [`InMemoryStore`] instances, optionally pre-seeded.
#[derive(Default, Debug)]
pub struct InMemoryStoreBuilder {
    seed: Vec<(String, Vec<Document>)>,
}

impl InMemoryStoreBuilder {
    /// Adds documents to be inserted into `collection` when the store is built.
    pub fn with_documents(mut self, collection: impl Into<String>, documents: Vec<Document>) -> Self {
        self.seed.push((collection.into(), documents));
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a new [`InMemoryStore`], inserting any seeded documents.
    ///
    /// Fails if the seed contains duplicate identifiers within a collection.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let store = InMemoryStore::new();

        for (name, documents) in self.seed {
            let handle = CollectionHandle::new(name, Default::default());
            store.insert_documents(documents, &handle).await?;
        }

        Ok(store)
    }
}


#[cfg(test)]
mod tests {
    use bson::doc;
    use serde_json::json;

    use docgate_core::{
        config::{CollectionConfig, IdMode},
        flatten::flatten,
        query::{Filter, SortDirection},
    };

    use super::*;

    fn users() -> CollectionHandle {
        CollectionHandle::new("users", CollectionConfig::default())
    }

    async fn seeded() -> InMemoryStore {
        InMemoryStore::builder()
            .with_documents("users", vec![
                doc! { "_id": "u1", "name": "Ada", "age": 36, "profile": { "city": "London", "zip": "N1" } },
                doc! { "_id": "u2", "name": "Grace", "age": 45, "status": "active" },
                doc! { "_id": 3, "name": "Linus", "age": 28, "status": "pending" },
            ])
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_object_ids_and_rejects_duplicates() {
        let store = InMemoryStore::new();
        let handle = users();

        store.insert_documents(vec![doc! { "name": "no id" }], &handle).await.unwrap();

        let docs = store.find_documents(Query::new(), &handle).await.unwrap();
        assert!(matches!(docs[0].get(ID_FIELD), Some(Bson::ObjectId(_))));

        store.insert_documents(vec![doc! { "_id": "a" }], &handle).await.unwrap();
        let err = store.insert_documents(vec![doc! { "_id": "a" }], &handle).await.unwrap_err();
        assert!(matches!(err, DocumentStoreError::Backend(_)));
    }

    #[tokio::test]
    async fn find_filters_sorts_and_limits() {
        let store = seeded().await;
        let query = Query::builder()
            .filter(Filter::exists("status"))
            .sort("age", SortDirection::Asc)
            .limit(1)
            .build();

        let docs = store.find_documents(query, &users()).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get_str("name").unwrap(), "Linus");
    }

    #[tokio::test]
    async fn find_without_sort_keeps_insertion_order_and_zero_limit_is_unbounded() {
        let store = seeded().await;
        let query = Query::builder().limit(0).build();

        let names = store
            .find_documents(query, &users())
            .await
            .unwrap()
            .iter()
            .map(|doc| doc.get_str("name").unwrap().to_string())
            .collect::<Vec<_>>();

        assert_eq!(names, ["Ada", "Grace", "Linus"]);
    }

    #[tokio::test]
    async fn find_on_missing_collection_is_empty() {
        let store = InMemoryStore::new();
        let docs = store.find_documents(Query::new(), &users()).await.unwrap();

        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn update_sets_leaf_paths_and_keeps_siblings() {
        let store = seeded().await;
        let update = flatten(&json!({ "profile": { "city": "Paris" }, "tags": ["x"] }), "");

        let updated = store
            .find_one_and_update(&DocumentId::new("u1"), update, &users())
            .await
            .unwrap()
            .unwrap();

        let profile = updated.get_document("profile").unwrap();
        assert_eq!(profile.get_str("city").unwrap(), "Paris");
        assert_eq!(profile.get_str("zip").unwrap(), "N1");
        assert_eq!(updated.get_array("tags").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_matches_numeric_ids_in_flexible_mode_only() {
        let store = seeded().await;
        let update = flatten(&json!({ "age": 29 }), "");

        let flexible = store
            .find_one_and_update(&DocumentId::new("3"), update.clone(), &users())
            .await
            .unwrap();
        assert_eq!(flexible.unwrap().get_i64("age").unwrap(), 29);

        let strict = CollectionHandle::new("users", CollectionConfig::with_id_mode(IdMode::String));
        let missing = store
            .find_one_and_update(&DocumentId::new("3"), update, &strict)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn empty_update_returns_current_document() {
        let store = seeded().await;

        let current = store
            .find_one_and_update(&DocumentId::new("u2"), FlatUpdate::new(), &users())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(current.get_str("name").unwrap(), "Grace");
    }

    #[tokio::test]
    async fn update_through_scalar_fails_and_leaves_document_unchanged() {
        let store = seeded().await;
        let update = flatten(&json!({ "age": 1, "name": { "first": "Grace" } }), "");

        let err = store
            .find_one_and_update(&DocumentId::new("u2"), update, &users())
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::Backend(_)));

        let query = Query::builder().filter(Filter::eq("_id", "u2")).build();
        let docs = store.find_documents(query, &users()).await.unwrap();
        assert_eq!(docs[0].get_i32("age").unwrap(), 45);
        assert_eq!(docs[0].get_str("name").unwrap(), "Grace");
    }

    #[tokio::test]
    async fn update_rejects_identifier_paths() {
        let store = seeded().await;

        for body in [json!({ "_id": "u2" }), json!({ "name": "Ada L", "_id": { "k": 1 } })] {
            let err = store
                .find_one_and_update(&DocumentId::new("u1"), flatten(&body, ""), &users())
                .await
                .unwrap_err();
            assert!(matches!(err, DocumentStoreError::Backend(_)));
        }

        let ids = store
            .find_documents(Query::new(), &users())
            .await
            .unwrap()
            .iter()
            .map(|doc| doc.get(ID_FIELD).cloned())
            .collect::<Vec<_>>();
        assert_eq!(ids, [Some(Bson::from("u1")), Some(Bson::from("u2")), Some(Bson::Int32(3))]);

        let untouched = store
            .find_documents(Query::builder().filter(Filter::eq("_id", "u1")).build(), &users())
            .await
            .unwrap();
        assert_eq!(untouched[0].get_str("name").unwrap(), "Ada");
    }

    #[test]
    fn identifier_path_detection() {
        assert!(touches_id("_id"));
        assert!(touches_id("_id.k"));
        assert!(!touches_id("_idx"));
        assert!(!touches_id("profile._id"));
    }

    #[tokio::test]
    async fn delete_removes_and_returns_document() {
        let store = seeded().await;

        let deleted = store
            .find_one_and_delete(&DocumentId::new("u2"), &users())
            .await
            .unwrap();
        assert_eq!(deleted.unwrap().get_str("name").unwrap(), "Grace");

        let again = store
            .find_one_and_delete(&DocumentId::new("u2"), &users())
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn list_collections_is_sorted() {
        let store = InMemoryStore::builder()
            .with_documents("zeta", vec![doc! {}])
            .with_documents("alpha", vec![doc! {}])
            .build()
            .await
            .unwrap();

        assert_eq!(store.list_collections().await.unwrap(), ["alpha", "zeta"]);
    }
}
