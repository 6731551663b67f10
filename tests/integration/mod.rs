//! Integration tests for the item service HTTP API.
//!
//! Each test drives a fresh router in-process with `tower::ServiceExt::oneshot`,
//! so no port is bound and tests do not share store state.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use item_service::api::{create_router, AppState};
use item_service::config::Settings;

fn app() -> Router {
    create_router(AppState::new(Settings::default()))
}

/// Send a request and return status plus parsed JSON body (Null when empty).
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, item) = send(app, Method::POST, "/api/v1/items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    item
}

/// Send a raw body to `uri`, optionally without a content type.
async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn root_endpoint_links_docs() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert_eq!(body["docs"], "/docs");
    assert_eq!(body["redoc"], "/redoc");
}

#[tokio::test]
async fn health_and_ready_report_status_and_timestamp() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let item = create(&app(), json!({"name": "Widget", "price": 19.99})).await;

    assert_eq!(
        item,
        json!({"id": 1, "name": "Widget", "description": null, "price": 19.99})
    );
}

#[tokio::test]
async fn created_item_can_be_fetched() {
    let app = app();
    let created = create(
        &app,
        json!({"name": "Test Item", "description": "A test item", "price": 19.99}),
    )
    .await;

    let (status, fetched) = send(&app, Method::GET, "/api/v1/items/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_starts_empty() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/items", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_unknown_item_is_404() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/items/99999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item with id 99999 not found");
}

#[tokio::test]
async fn delete_first_of_two_leaves_second() {
    let app = app();
    create(&app, json!({"name": "First", "price": 1.0})).await;
    let second = create(&app, json!({"name": "Second", "price": 2.0})).await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, Method::GET, "/api/v1/items", None).await;
    assert_eq!(list, json!([second]));

    let (status, _) = send(&app, Method::GET, "/api/v1/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/items/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_description_only_keeps_other_fields() {
    let app = app();
    create(&app, json!({"name": "Widget", "price": 19.99})).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/items/1",
        Some(json!({"description": "new"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Widget", "description": "new", "price": 19.99})
    );
}

#[tokio::test]
async fn update_with_null_description_clears_it() {
    let app = app();
    create(
        &app,
        json!({"name": "Widget", "description": "old", "price": 1.0}),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/items/1",
        Some(json!({"description": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn update_unknown_item_is_404() {
    let (status, _) = send(
        &app(),
        Method::PUT,
        "/api/v1/items/5",
        Some(json!({"price": 2.0})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_price_is_422_and_nothing_is_inserted() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "Widget", "price": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "price");

    let (_, list) = send(&app, Method::GET, "/api/v1/items", None).await;
    assert_eq!(list, json!([]));

    // Counter was not advanced by the rejected request.
    let item = create(&app, json!({"name": "Widget", "price": 0.01})).await;
    assert_eq!(item["id"], 1);
}

#[tokio::test]
async fn name_length_boundaries() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "", "price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "n".repeat(101), "price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    create(&app, json!({"name": "n".repeat(100), "price": 1.0})).await;
}

#[tokio::test]
async fn update_with_zero_price_is_422_and_item_unchanged() {
    let app = app();
    let created = create(&app, json!({"name": "Widget", "price": 3.0})).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/items/1",
        Some(json!({"name": "Renamed", "price": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&app, Method::GET, "/api/v1/items/1", None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_required_field_is_422() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "Widget"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "Validation failed");
    assert_eq!(body["errors"][0]["field"], "price");
}

#[tokio::test]
async fn wrong_field_type_names_the_field() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "Widget", "price": "cheap"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "price");
}

#[tokio::test]
async fn truncated_json_body_is_422() {
    let app = app();

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/v1/items",
        Some("application/json"),
        r#"{"name":"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "body");

    let (_, list) = send(&app, Method::GET, "/api/v1/items", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn body_without_json_content_type_is_422() {
    let app = app();
    create(&app, json!({"name": "Widget", "price": 1.0})).await;

    let (status, body) = send_raw(
        &app,
        Method::POST,
        "/api/v1/items",
        None,
        r#"{"name": "Widget", "price": 1.0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "body");

    let (status, _) = send_raw(
        &app,
        Method::PUT,
        "/api/v1/items/1",
        Some("text/plain"),
        r#"{"price": 2.0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn negative_id_is_404_on_every_item_route() {
    let app = app();
    create(&app, json!({"name": "Widget", "price": 1.0})).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/items/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item with id -1 not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/items/-1",
        Some(json!({"price": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/items/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/items/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "id");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/items/1.5", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ids_keep_increasing_across_deletes() {
    let app = app();
    for _ in 0..3 {
        create(&app, json!({"name": "x", "price": 1.0})).await;
    }
    send(&app, Method::DELETE, "/api/v1/items/3", None).await;

    let item = create(&app, json!({"name": "y", "price": 1.0})).await;
    assert_eq!(item["id"], 4);
}
