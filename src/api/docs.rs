//! OpenAPI document served at `/openapi.json`, `/docs` and `/redoc`.

use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::handlers::{self, HealthResponse, RootResponse};
use crate::items::{FieldViolation, Item, ItemCreate, ItemUpdate};

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item Service",
        description = "CRUD endpoints over an in-memory item collection"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::ready,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item,
    ),
    components(schemas(
        Item,
        ItemCreate,
        ItemUpdate,
        FieldViolation,
        ErrorResponse,
        HealthResponse,
        RootResponse,
    )),
    tags(
        (name = "Root", description = "Service banner"),
        (name = "Health", description = "Liveness and readiness checks"),
        (name = "Items", description = "Item CRUD"),
    )
)]
pub struct ApiDoc;
