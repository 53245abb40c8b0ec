//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beast Hustle API",
        version = "0.1.0",
        description = "Product catalog, order capture and drop notifications"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_storefront::ApiDoc)
    )
)]
pub struct ApiDoc;
