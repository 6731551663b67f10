//! In-memory item service.
//!
//! A small HTTP service exposing CRUD operations over a process-local
//! collection of items, plus liveness/readiness checks.
//!
//! # Item lifecycle
//!
//! ```text
//! POST   /api/v1/items       -> id assigned (1, 2, 3, ...)
//! PUT    /api/v1/items/{id}  -> provided fields applied, id unchanged
//! DELETE /api/v1/items/{id}  -> removed, id never handed out again
//! ```
//!
//! # Modules
//!
//! - [`config`]: Settings loaded from environment
//! - [`error`]: Unified error types
//! - [`items`]: Item model, validation and the in-memory store
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`logging`]: Tracing subscriber setup
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod items;
pub mod logging;
pub mod metrics;
pub mod utils;

pub use config::Settings;
pub use error::ServiceError;
