//! Route handlers.
//!
//! Each handler performs exactly one registry operation on already-decoded
//! input. Bodies are taken as `Result<Json<_>, JsonRejection>` so a bad body
//! becomes an [`ApiError`] through the same path as every other failure.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use crate::http::response::{ApiError, ErrorBody};
use crate::http::server::AppState;
use crate::registry::{Product, ProductId, ProductPayload, RegistryError};

/// First value of `key` in a decoded query string.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub async fn hello() -> &'static str {
    "Hello World"
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.registry.list(first_param(&params, "name"))?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = raw_id.parse()?;
    Ok(Json(state.registry.get(id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(payload) = payload?;
    let product = state.registry.create(&payload)?;
    tracing::info!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Unknown ids are reported before the body is looked at.
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = raw_id.parse()?;
    if !state.registry.contains(id) {
        return Err(RegistryError::NotFound(id).into());
    }

    let Json(payload) = payload?;
    let product = state.registry.update(id, &payload)?;
    tracing::info!(id = %product.id, "Product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let id: ProductId = raw_id.parse()?;
    let remaining = state.registry.delete(id)?;
    tracing::info!(id = %id, remaining = remaining.len(), "Product deleted");
    Ok(Json(remaining))
}

pub async fn fallback() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param_takes_first_occurrence() {
        let params = vec![
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "a".to_string()),
            ("name".to_string(), "b".to_string()),
        ];
        assert_eq!(first_param(&params, "name"), Some("a"));
        assert_eq!(first_param(&params, "missing"), None);
    }
}
