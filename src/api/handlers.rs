//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::error::{ApiError, ErrorResponse};
use super::extract::{ItemIdPath, ValidJson};
use crate::config::Settings;
use crate::items::{Item, ItemCreate, ItemStore, ItemUpdate};
use crate::metrics::RequestTimer;
use crate::utils::current_timestamp;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The item store. Owned here and nowhere else.
    pub store: Arc<ItemStore>,
    /// Effective settings.
    pub settings: Arc<Settings>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state with an empty store.
    pub fn new(settings: Settings) -> Self {
        Self {
            store: Arc::new(ItemStore::new()),
            settings: Arc::new(settings),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health/readiness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" or "ready".
    #[schema(example = "healthy")]
    pub status: String,
    /// RFC 3339 UTC timestamp.
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}

/// Root endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting.
    pub message: String,
    /// Swagger UI location.
    pub docs: String,
    /// ReDoc location.
    pub redoc: String,
}

/// Root handler - points at the API docs.
#[utoipa::path(get, path = "/", tag = "Root",
    responses((status = 200, description = "Service banner", body = RootResponse)))]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}", state.settings.app_name),
        docs: "/docs".to_string(),
        redoc: "/redoc".to_string(),
    })
}

/// Liveness check - always 200 while the process runs.
#[utoipa::path(get, path = "/health", tag = "Health",
    responses((status = 200, description = "Process is alive", body = HealthResponse)))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: current_timestamp(),
    })
}

/// Readiness check. There are no backing services to check, so this always
/// reports ready.
#[utoipa::path(get, path = "/ready", tag = "Health",
    responses((status = 200, description = "Ready to serve", body = HealthResponse)))]
pub async fn ready() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        timestamp: current_timestamp(),
    })
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// List all items.
#[utoipa::path(get, path = "/api/v1/items", tag = "Items",
    responses((status = 200, description = "All items, ascending by id", body = [Item])))]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let _timer = RequestTimer::new("list_items");
    Json(state.store.list())
}

/// Get one item.
#[utoipa::path(get, path = "/api/v1/items/{id}", tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "No such item", body = ErrorResponse),
    ))]
pub async fn get_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<Item>, ApiError> {
    let _timer = RequestTimer::new("get_item");
    Ok(Json(state.store.get(id)?))
}

/// Create an item.
#[utoipa::path(post, path = "/api/v1/items", tag = "Items",
    request_body = ItemCreate,
    responses(
        (status = 201, description = "Created", body = Item),
        (status = 422, description = "Invalid input", body = ErrorResponse),
    ))]
pub async fn create_item(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ItemCreate>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let _timer = RequestTimer::new("create_item");
    let item = state.store.create(input)?;
    info!(id = item.id, "Created item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Partially update an item.
#[utoipa::path(put, path = "/api/v1/items/{id}", tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = ItemUpdate,
    responses(
        (status = 200, description = "Updated", body = Item),
        (status = 404, description = "No such item", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
    ))]
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    ValidJson(update): ValidJson<ItemUpdate>,
) -> Result<Json<Item>, ApiError> {
    let _timer = RequestTimer::new("update_item");
    let item = state.store.update(id, update)?;
    info!(id, "Updated item");
    Ok(Json(item))
}

/// Delete an item.
#[utoipa::path(delete, path = "/api/v1/items/{id}", tag = "Items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such item", body = ErrorResponse),
    ))]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<StatusCode, ApiError> {
    let _timer = RequestTimer::new("delete_item");
    state.store.delete(id)?;
    info!(id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}
