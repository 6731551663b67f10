//! Mapping of item errors and request rejections onto HTTP responses.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::ItemError;
use crate::items::{FieldViolation, ValidationErrors};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description.
    #[schema(example = "Item with id 99999 not found")]
    pub detail: String,
    /// Per-field violations, present on validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Store operation failed.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Request could not be extracted for a reason other than bad input
    /// (body read failure, missing route parameters).
    #[error("{message}")]
    Rejected {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Extractor's explanation.
        message: String,
    },
}

impl ApiError {
    /// Validation failure for a single field.
    pub fn invalid(violation: FieldViolation) -> Self {
        Self::Item(ItemError::Validation(ValidationErrors::from(vec![violation])))
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Item(ItemError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Item(ItemError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Item(ItemError::Validation(errors)) => ErrorResponse {
                detail: "Validation failed".to_string(),
                errors: errors.violations().to_vec(),
            },
            other => ErrorResponse {
                detail: other.to_string(),
                errors: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
