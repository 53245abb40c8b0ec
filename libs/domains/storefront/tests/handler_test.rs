//! Handler tests for the storefront domain
//!
//! The domain router runs against a real MongoDB container, so these cover
//! the JSON contract and what actually lands in the store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_storefront::repository::{DocumentStore, ORDERS, PRODUCTS};
use domain_storefront::{handlers, MongoDocumentStore, StorefrontService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_empty_catalog_lists_empty_array() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_empty_catalog");
    let db = mongo.database(&builder.database_name());
    let app = handlers::router(StorefrontService::new(MongoDocumentStore::new(&db)));

    let response = app.oneshot(get("/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_create_then_list_product() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_create_list");
    let db = mongo.database(&builder.database_name());
    let app = handlers::router(StorefrontService::new(MongoDocumentStore::new(&db)));

    let response = app
        .clone()
        .oneshot(post(
            "/products",
            json!({
                "title": "Signature Hoodie",
                "price": 79.0,
                "currency": "EUR",
                "images": ["https://cdn.example.com/hoodie-front.png"],
                "limited_drop": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response.into_body()).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], id);
    assert_eq!(products[0]["title"], "Signature Hoodie");
    assert_eq!(products[0]["currency"], "EUR");
    assert_eq!(products[0]["in_stock"], true);
    assert_eq!(products[0]["limited_drop"], true);
    assert!(products[0].get("_id").is_none());
    assert!(products[0].get("created_at").is_none());
}

#[tokio::test]
async fn test_invalid_product_is_not_stored() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_invalid_product");
    let db = mongo.database(&builder.database_name());
    let app = handlers::router(StorefrontService::new(MongoDocumentStore::new(&db)));

    let response = app
        .oneshot(post("/products", json!({"title": "Tee", "price": -5.0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1001);

    let stored = MongoDocumentStore::new(&db).list(PRODUCTS).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_order_is_stored_with_items() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_order");
    let db = mongo.database(&builder.database_name());
    let app = handlers::router(StorefrontService::new(MongoDocumentStore::new(&db)));

    let response = app
        .oneshot(post(
            "/orders",
            json!({
                "customer_name": "Jane",
                "email": builder.email("jane"),
                "shipping_address": "1 Main St",
                "items": [
                    {"product_id": "p1", "quantity": 2, "unit_price": 10.0},
                    {"product_id": "p2", "quantity": 1, "unit_price": 5.5}
                ],
                "total": 25.5,
                "note": "Leave at the door"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["ok"], true);

    let stored = MongoDocumentStore::new(&db).list(ORDERS).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get_str("id").unwrap(), body["id"].as_str().unwrap());
    assert_eq!(stored[0].get_array("items").unwrap().len(), 2);
    assert_eq!(stored[0].get_str("note").unwrap(), "Leave at the door");
}

#[tokio::test]
async fn test_order_with_empty_items_is_rejected() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_order_empty");
    let db = mongo.database(&builder.database_name());
    let app = handlers::router(StorefrontService::new(MongoDocumentStore::new(&db)));

    let response = app
        .oneshot(post(
            "/orders",
            json!({
                "customer_name": "Jane",
                "email": "jane@x.com",
                "shipping_address": "1 Main St",
                "items": [],
                "total": 0.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let stored = MongoDocumentStore::new(&db).list(ORDERS).await.unwrap();
    assert!(stored.is_empty());
}
