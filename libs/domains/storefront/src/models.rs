use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

/// Catalog item. Stored in the `product` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Product {
    /// Product title
    #[validate(length(min = 1))]
    #[schema(example = "Signature Series Energy")]
    pub title: String,
    /// Short tagline
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in major currency units
    #[validate(range(min = 0.0))]
    #[schema(example = 44.0, minimum = 0.0)]
    pub price: f64,
    /// ISO 4217 code
    #[serde(default = "default_currency")]
    #[schema(default = "USD")]
    pub currency: String,
    /// Image URLs, in display order
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_true")]
    #[schema(default = true)]
    pub in_stock: bool,
    /// Stock keeping unit
    #[serde(default)]
    pub sku: Option<String>,
    /// Part of a limited drop
    #[serde(default)]
    pub limited_drop: bool,
    #[serde(default)]
    pub units_per_case: Option<i64>,
}

/// Product as returned by the catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductRecord {
    /// Opaque identifier assigned by the store
    #[schema(example = "665f1c2e9b1d4a0012ab34cd")]
    pub id: String,
    #[serde(flatten)]
    pub product: Product,
}

/// Line item embedded in an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    /// Catalog id; existence is not checked
    pub product_id: String,
    #[validate(range(min = 1))]
    #[schema(minimum = 1)]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0)]
    pub unit_price: f64,
}

/// Captured purchase intent. Stored in the `order` collection.
///
/// `total` is taken as given and not reconciled against `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Order {
    pub customer_name: String,
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub shipping_address: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0)]
    pub total: f64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Drop-notification signup. Stored in the `subscriber` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Subscriber {
    #[validate(email)]
    pub email: String,
    /// Where the signup came from, e.g. "landing"
    #[serde(default)]
    pub source: Option<String>,
}

/// Body of `POST /api/subscribe`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email)]
    #[schema(example = "fan@example.com")]
    pub email: String,
}

/// Customer profile for the `user` collection. No route writes it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    #[validate(range(min = 0, max = 120))]
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderCreatedResponse {
    pub id: String,
    pub ok: bool,
}

/// Which database settings were present at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPresence {
    pub database_url: bool,
    pub database_name: bool,
}

/// Body of the `GET /test` connectivity probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticReport {
    #[schema(example = "✅ Running")]
    pub backend: String,
    #[schema(example = "✅ Connected & Working")]
    pub database: String,
    #[schema(example = "✅ Set")]
    pub database_url: String,
    #[schema(example = "✅ Set")]
    pub database_name: String,
    #[schema(example = "Connected")]
    pub connection_status: String,
    /// At most 10 names
    pub collections: Vec<String>,
}
