//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    Collection, Database,
};
use tracing::instrument;

use crate::error::PersistenceError;
use crate::repository::{id_to_string, normalize_id, DocumentStore};

pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, document))]
    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, PersistenceError> {
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let result = self.collection(collection).insert_one(document).await?;
        let id = id_to_string(&result.inserted_id);

        tracing::info!(collection, id = %id, "Document inserted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list(&self, collection: &str) -> Result<Vec<Document>, PersistenceError> {
        let documents: Vec<Document> = self
            .collection(collection)
            .find(doc! {})
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(normalize_id).collect())
    }

    #[instrument(skip(self, filter))]
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, PersistenceError> {
        let found = self.collection(collection).find_one(filter).await?;
        Ok(found.map(normalize_id))
    }

    #[instrument(skip(self))]
    async fn collection_names(&self) -> Result<Vec<String>, PersistenceError> {
        Ok(self.db.list_collection_names().await?)
    }
}
