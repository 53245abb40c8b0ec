use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document};
use serde::Serialize;

use crate::error::PersistenceError;

pub const PRODUCTS: &str = "product";
pub const ORDERS: &str = "order";
pub const SUBSCRIBERS: &str = "subscriber";

/// Schemaless document gateway over named collections.
///
/// Documents handed back by `list` and `find_one` are already normalized:
/// the store's `_id` is gone and a string `id` sits in its place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its generated id.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, PersistenceError>;

    /// Every document in the collection, in store order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, PersistenceError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, PersistenceError>;

    async fn collection_names(&self) -> Result<Vec<String>, PersistenceError>;
}

pub fn to_document<T: Serialize>(value: &T) -> Result<Document, PersistenceError> {
    Ok(bson::to_document(value)?)
}

/// Render a store-assigned id as text. ObjectIds become 24-char hex.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace `_id` with a string `id` as the first field.
pub fn normalize_id(mut document: Document) -> Document {
    let Some(raw) = document.remove("_id") else {
        return document;
    };

    let mut normalized = Document::new();
    normalized.insert("id", id_to_string(&raw));
    for (key, value) in document {
        normalized.insert(key, value);
    }
    normalized
}
