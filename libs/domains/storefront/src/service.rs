//! Storefront Service - validation in front of the document store

use mongodb::bson::{self, doc, Document};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{PersistenceError, StorefrontResult};
use crate::models::{
    ConfigPresence, DiagnosticReport, Order, Product, ProductRecord, SubscribeRequest, Subscriber,
};
use crate::repository::{to_document, DocumentStore, ORDERS, PRODUCTS, SUBSCRIBERS};

const SUBSCRIBE_SOURCE: &str = "landing";
const PROBE_COLLECTION_LIMIT: usize = 10;
const PROBE_ERROR_CHARS: usize = 50;

/// Every write is validated before the store is touched.
///
/// Built without a store (`unconfigured`) when no database settings were
/// provided; store-backed operations then fail with
/// [`PersistenceError::NotConfigured`].
pub struct StorefrontService<S: DocumentStore> {
    store: Option<Arc<S>>,
}

impl<S: DocumentStore> Clone for StorefrontService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> StorefrontService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Some(Arc::new(store)),
        }
    }

    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&S, PersistenceError> {
        self.store.as_deref().ok_or(PersistenceError::NotConfigured)
    }

    /// Validate and insert a product, returning its id.
    #[instrument(skip(self, product), fields(title = %product.title))]
    pub async fn create_product(&self, product: Product) -> StorefrontResult<String> {
        product.validate()?;
        let document = to_document(&product)?;
        Ok(self.store()?.insert(PRODUCTS, document).await?)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> StorefrontResult<Vec<ProductRecord>> {
        let documents = self.store()?.list(PRODUCTS).await?;
        let products = documents
            .into_iter()
            .map(decode_product)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn find_product_by_sku(&self, sku: &str) -> StorefrontResult<Option<ProductRecord>> {
        let found = self
            .store()?
            .find_one(PRODUCTS, doc! { "sku": sku })
            .await?;
        Ok(found.map(decode_product).transpose()?)
    }

    /// Record a drop-notification signup. Duplicate emails are kept.
    #[instrument(skip(self, request))]
    pub async fn subscribe(&self, request: SubscribeRequest) -> StorefrontResult<String> {
        request.validate()?;
        let subscriber = Subscriber {
            email: request.email,
            source: Some(SUBSCRIBE_SOURCE.to_string()),
        };
        let document = to_document(&subscriber)?;
        Ok(self.store()?.insert(SUBSCRIBERS, document).await?)
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn create_order(&self, order: Order) -> StorefrontResult<String> {
        order.validate()?;
        let document = to_document(&order)?;
        Ok(self.store()?.insert(ORDERS, document).await?)
    }

    /// Connectivity summary for `GET /test`. Failures are reported in the
    /// body, never returned.
    #[instrument(skip(self))]
    pub async fn diagnostics(&self, presence: ConfigPresence) -> DiagnosticReport {
        let (database, collections) = match self.store() {
            Err(_) => ("⚠️  Available but not initialized".to_string(), Vec::new()),
            Ok(store) => match store.collection_names().await {
                Ok(names) => (
                    "✅ Connected & Working".to_string(),
                    names.into_iter().take(PROBE_COLLECTION_LIMIT).collect(),
                ),
                Err(e) => {
                    tracing::warn!(error = %e, "Diagnostic collection listing failed");
                    let reason: String = e.to_string().chars().take(PROBE_ERROR_CHARS).collect();
                    (format!("⚠️  Connected but Error: {}", reason), Vec::new())
                }
            },
        };

        DiagnosticReport {
            backend: "✅ Running".to_string(),
            database,
            database_url: presence_label(presence.database_url),
            database_name: presence_label(presence.database_name),
            connection_status: if self.is_configured() {
                "Connected".to_string()
            } else {
                "Not Connected".to_string()
            },
            collections,
        }
    }
}

fn presence_label(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn decode_product(document: Document) -> Result<ProductRecord, PersistenceError> {
    let id = document
        .get_str("id")
        .map_err(|e| PersistenceError::Decode(e.to_string()))?
        .to_string();
    let product: Product = bson::from_document(document)?;
    Ok(ProductRecord { id, product })
}
