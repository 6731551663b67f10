//! HTTP API route definitions.

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    create_item, delete_item, get_item, health, list_items, metrics, ready, root, update_item,
    AppState,
};
use crate::config::Settings;

/// Prefix for the versioned item routes.
pub const API_PREFIX: &str = "/api/v1";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let settings = state.settings.clone();

    let router = Router::new()
        .route("/", get(root))
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/metrics", get(metrics))
        // Item endpoints
        .nest(API_PREFIX, item_routes())
        // API docs
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .with_state(state);

    apply_layers(router, &settings)
}

/// Wrap a router in request tracing, panic recovery (500) and CORS.
pub fn apply_layers(router: Router, settings: &Settings) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(cors_layer(settings))
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// CORS policy with credentials allowed. Without configured origins the
/// request origin is echoed back, so any origin is accepted; with a list,
/// only those origins.
pub fn cors_layer(settings: &Settings) -> CorsLayer {
    // Wildcards cannot be combined with credentials, so methods and headers
    // mirror the preflight request.
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match &settings.cors_allowed_origins {
        None => layer.allow_origin(AllowOrigin::mirror_request()),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}
