//! Storefront Domain
//!
//! Product catalog, order capture and drop-notification signups on top of a
//! MongoDB document store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (ValidatedJson)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, diagnostics     ◄── seed (startup)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │DocumentStore│  ← Named collections (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, Order, Subscriber, User
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_storefront::{handlers, seed, MongoDocumentStore, StorefrontService};
//! use mongodb::Client;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("storefront");
//!
//! let service = StorefrontService::new(MongoDocumentStore::new(&db));
//! seed::run_startup_seed(&service, Duration::from_secs(5)).await;
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seed;
pub mod service;

pub use error::{PersistenceError, StorefrontError, StorefrontResult};
pub use handlers::ApiDoc;
pub use models::{
    ConfigPresence, CreatedResponse, DiagnosticReport, OkResponse, Order, OrderCreatedResponse,
    OrderItem, Product, ProductRecord, SubscribeRequest, Subscriber, User,
};
pub use self::mongodb::MongoDocumentStore;
pub use repository::DocumentStore;
pub use seed::{SeedOutcome, DEMO_SKU};
pub use service::StorefrontService;
