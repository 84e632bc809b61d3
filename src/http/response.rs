//! Error to response mapping.
//!
//! # Responsibilities
//! - Map registry failures to HTTP status codes
//! - Keep the two plain-string 404 bodies clients already rely on
//! - Report rejected bodies without failing anything beyond the request
//!
//! # Design Decisions
//! - Not-found and disabled-filter bodies are bare JSON strings
//! - Every other error body is `{"message": ..., "details": ...}`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::registry::RegistryError;

pub const PRODUCT_NOT_FOUND: &str = "product not found";
pub const FILTER_DISABLED: &str = "name query param was disabled";

/// JSON body for errors that are not bare strings.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

/// Failure returned by a handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The body could not be decoded into the expected shape.
    #[error("request body rejected: {0}")]
    BodyRejected(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Registry(RegistryError::NotFound(id)) => {
                tracing::debug!(id = %id, "Product not found");
                (StatusCode::NOT_FOUND, Json(PRODUCT_NOT_FOUND)).into_response()
            }
            ApiError::Registry(RegistryError::FilterDisabled) => {
                (StatusCode::NOT_FOUND, Json(FILTER_DISABLED)).into_response()
            }
            ApiError::Registry(RegistryError::MalformedId(raw)) => {
                tracing::debug!(id = %raw, "Malformed product id");
                let body = ErrorBody::new(format!("invalid product id {:?}", raw));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Registry(RegistryError::Validation(errors)) => {
                tracing::debug!(error = %errors, "Product validation failed");
                let body = ErrorBody {
                    message: "request validation failed".to_string(),
                    details: Some(validation_details(&errors)),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::BodyRejected(rejection) => {
                tracing::warn!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "Request body rejected"
                );
                let body = ErrorBody::new(rejection.body_text());
                (rejection.status(), Json(body)).into_response()
            }
        }
    }
}

/// Per-field constraint failures as `{field: [{code, message}]}`.
fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(details)
}
