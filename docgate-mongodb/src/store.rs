//! MongoDB-backed storage implementation.
//!
//! Collection names and field paths are passed to MongoDB as the request supplied them;
//! partial updates become a single `$set` of dotted paths.

use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions, ReturnDocument},
};
use tracing::{debug, info};
use docgate_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    flatten::FlatUpdate,
    identifier::DocumentId,
    query::Query,
    registry::CollectionHandle,
};

use crate::query::MongoQueryTranslator;


#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection: &CollectionHandle) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection.name())
    }

    fn find_options(query: &Query) -> FindOptions {
        let mut options = FindOptions::default();

        if let Some(limit) = query.effective_limit() {
            // Negative limits mean a single batch to the server
            options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        if let Some(sort) = &query.sort {
            options.sort = Some(MongoQueryTranslator::sort(sort));
        }

        options
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert_documents(&self, documents: Vec<Document>, collection: &CollectionHandle) -> DocumentStoreResult<()> {
        if documents.is_empty() {
            return Ok(());
        }

        self.get_collection(collection)
            .insert_many(documents)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn find_documents(&self, query: Query, collection: &CollectionHandle) -> DocumentStoreResult<Vec<Document>> {
        let filter = MongoQueryTranslator::filter(query.filter.as_ref())?;

        debug!(collection = %collection.name(), filter = %filter, "Running find");

        self.get_collection(collection)
            .find(filter)
            .with_options(Self::find_options(&query))
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn find_one_and_update(
        &self,
        id: &DocumentId,
        update: FlatUpdate,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        let filter = MongoQueryTranslator::id_filter(id.candidates(collection.id_mode()));

        // `$set` with no fields is rejected by the server
        if update.is_empty() {
            return self.get_collection(collection)
                .find_one(filter)
                .await
                .map_err(|e| DocumentStoreError::Backend(e.to_string()));
        }

        self.get_collection(collection)
            .find_one_and_update(filter, doc! { "$set": update.to_document()? })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn find_one_and_delete(
        &self,
        id: &DocumentId,
        collection: &CollectionHandle,
    ) -> DocumentStoreResult<Option<Document>> {
        self.get_collection(collection)
            .find_one_and_delete(MongoQueryTranslator::id_filter(id.candidates(collection.id_mode())))
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        self.client
            .database(&self.database)
            .list_collection_names()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        info!(database = %self.database, "Shutting down MongoDB client");
        self.client.shutdown().await;

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let client = Client::with_options(
            ClientOptions::parse(&self.dsn)
                .await
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
        )
        .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        info!(database = %self.database, "Connected MongoDB client");

        Ok(MongoDbStore::new(client, self.database))
    }
}


#[cfg(test)]
mod tests {
    use docgate_core::query::SortDirection;

    use super::*;

    #[test]
    fn zero_limit_leaves_find_unbounded() {
        let query = Query::builder()
            .limit(0)
            .sort("age", SortDirection::Asc)
            .build();
        let options = MongoDbStore::find_options(&query);

        assert_eq!(options.limit, None);
        assert_eq!(options.sort, Some(doc! { "age": 1 }));
    }

    #[test]
    fn limit_is_forwarded() {
        let options = MongoDbStore::find_options(&Query::builder().limit(50).build());

        assert_eq!(options.limit, Some(50));
        assert_eq!(options.sort, None);
    }

    #[test]
    fn oversized_limit_saturates_instead_of_wrapping() {
        let options = MongoDbStore::find_options(&Query::builder().limit(usize::MAX).build());

        assert_eq!(options.limit, Some(i64::MAX));
    }
}
