//! HTTP handlers for the storefront API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestJsonResponse, InternalServerErrorResponse, ServiceUnavailableResponse,
        ValidationErrorResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StorefrontResult;
use crate::models::{
    CreatedResponse, OkResponse, Order, OrderCreatedResponse, OrderItem, Product, ProductRecord,
    SubscribeRequest,
};
use crate::repository::DocumentStore;
use crate::service::StorefrontService;

#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, subscribe, create_order),
    components(
        schemas(
            Product, ProductRecord, Order, OrderItem, SubscribeRequest,
            CreatedResponse, OkResponse, OrderCreatedResponse
        ),
        responses(
            BadRequestJsonResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Product catalog"),
        (name = "Orders", description = "Order capture, no payment"),
        (name = "Subscribers", description = "Drop notification signups")
    )
)]
pub struct ApiDoc;

type SharedService<S> = State<Arc<StorefrontService<S>>>;

/// Routes mounted under `/api`.
pub fn router<S: DocumentStore + 'static>(service: StorefrontService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/subscribe", post(subscribe))
        .route("/orders", post(create_order))
        .with_state(shared_service)
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Every product, in store order", body = Vec<ProductRecord>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<S: DocumentStore>(
    State(service): SharedService<S>,
) -> StorefrontResult<Json<Vec<ProductRecord>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = CreatedResponse),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<S: DocumentStore>(
    State(service): SharedService<S>,
    ValidatedJson(product): ValidatedJson<Product>,
) -> StorefrontResult<impl IntoResponse> {
    let id = service.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Sign up for drop notifications
#[utoipa::path(
    post,
    path = "/subscribe",
    tag = "Subscribers",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscription recorded", body = OkResponse),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn subscribe<S: DocumentStore>(
    State(service): SharedService<S>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> StorefrontResult<impl IntoResponse> {
    service.subscribe(request).await?;
    Ok((StatusCode::CREATED, Json(OkResponse { ok: true })))
}

/// Capture an order
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = Order,
    responses(
        (status = 201, description = "Order recorded", body = OrderCreatedResponse),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_order<S: DocumentStore>(
    State(service): SharedService<S>,
    ValidatedJson(order): ValidatedJson<Order>,
) -> StorefrontResult<impl IntoResponse> {
    let id = service.create_order(order).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse { id, ok: true }),
    ))
}
