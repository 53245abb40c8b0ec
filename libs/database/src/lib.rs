//! Database connectors shared by the workspace services.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, health probes
//! - `config` - `core_config::FromEnv` support for connection settings
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//! use std::time::Duration;
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "storefront");
//! let client = mongodb::connect_from_config(&config, Duration::from_secs(3)).await?;
//! let db = client.database(config.database());
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
