//! Request extractors that report bad input as field-level 422 errors.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::items::{FieldViolation, ItemId};
use crate::metrics;

/// Item id from the `{id}` path segment. Any integer is accepted; unknown
/// ids are the store's concern.
#[derive(Debug, Clone, Copy)]
pub struct ItemIdPath(pub ItemId);

#[async_trait]
impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<ItemId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => {
                metrics::inc_validation_failures();
                Err(ApiError::invalid(FieldViolation::new(
                    "id",
                    "must be an integer",
                )))
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// JSON body whose syntax, shape and content-type errors all become
/// validation failures naming the offending field.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            metrics::inc_validation_failures();
            return Err(ApiError::invalid(FieldViolation::new(
                "body",
                "expected `Content-Type: application/json`",
            )));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        parse_json(&bytes).map(ValidJson).map_err(|violation| {
            metrics::inc_validation_failures();
            ApiError::invalid(violation)
        })
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Deserialize a JSON body, turning the first error into a violation on the
/// field it occurred at (`body` when it is not tied to a field).
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldViolation> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut de).map_err(violation_from)?;
    de.end()
        .map_err(|e| FieldViolation::new("body", format!("invalid JSON: {}", strip_position(&e))))?;
    Ok(value)
}

fn violation_from(err: serde_path_to_error::Error<serde_json::Error>) -> FieldViolation {
    let path = err.path().to_string();
    let inner = err.into_inner();

    if !inner.is_data() {
        return FieldViolation::new("body", format!("invalid JSON: {}", strip_position(&inner)));
    }

    let message = strip_position(&inner);
    if path == "." {
        match missing_field(&message) {
            Some(field) => FieldViolation::new(field, "field required"),
            None => FieldViolation::new("body", message),
        }
    } else {
        FieldViolation::new(path, message)
    }
}

/// serde_json appends " at line L column C" to its messages.
fn strip_position(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")?
        .split('`')
        .next()
}
