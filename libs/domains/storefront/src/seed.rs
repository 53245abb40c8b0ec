//! Startup seeding of the demo catalog entry.
//!
//! The lookup and the insert are two separate store calls. Two processes
//! starting at the same time can both miss the lookup and insert twice.

use std::time::Duration;
use tracing::instrument;

use crate::error::StorefrontResult;
use crate::models::Product;
use crate::repository::DocumentStore;
use crate::service::StorefrontService;

pub const DEMO_SKU: &str = "BH-SS-001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadyPresent,
    Created { id: String },
}

pub fn demo_product() -> Product {
    Product {
        title: "Beast Hustle Signature Series".to_string(),
        subtitle: Some("Limited drop".to_string()),
        description: Some(
            "The first Beast Hustle drop. Shipped 30 units to a case while stock lasts.".to_string(),
        ),
        price: 44.0,
        currency: "EUR".to_string(),
        images: Vec::new(),
        in_stock: true,
        sku: Some(DEMO_SKU.to_string()),
        limited_drop: true,
        units_per_case: Some(30),
    }
}

/// Insert the demo product unless one with [`DEMO_SKU`] already exists.
#[instrument(skip(service))]
pub async fn seed_demo_product<S: DocumentStore>(
    service: &StorefrontService<S>,
) -> StorefrontResult<SeedOutcome> {
    if service.find_product_by_sku(DEMO_SKU).await?.is_some() {
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let id = service.create_product(demo_product()).await?;
    Ok(SeedOutcome::Created { id })
}

/// Run [`seed_demo_product`] for at most `budget` and log the result.
/// Never fails.
pub async fn run_startup_seed<S: DocumentStore>(
    service: &StorefrontService<S>,
    budget: Duration,
) {
    match tokio::time::timeout(budget, seed_demo_product(service)).await {
        Ok(Ok(SeedOutcome::Created { id })) => {
            tracing::info!(sku = DEMO_SKU, id = %id, "Seeded demo product")
        }
        Ok(Ok(SeedOutcome::AlreadyPresent)) => {
            tracing::debug!(sku = DEMO_SKU, "Demo product already present")
        }
        Ok(Err(e)) => tracing::warn!(sku = DEMO_SKU, error = %e, "Seeding demo product failed"),
        Err(_) => tracing::warn!(
            sku = DEMO_SKU,
            "Seeding demo product gave up after {:?}",
            budget
        ),
    }
}
