use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::product::parse_id;
use service::Product;

use crate::errors::{ApiError, OrApiError, Operation, ValidatedProduct};
use crate::state::AppState;

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid payload or store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(input).await.or_api(Operation::Create)?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list().await.or_api(Operation::List)?;
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id).or_api(Operation::Get)?;
    let product = state.products.get(id).await.or_api(Operation::Get)?;
    Ok(Json(product))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed id or payload", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedProduct(patch): ValidatedProduct,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id).or_api(Operation::Update)?;
    let product = state.products.update(id, patch).await.or_api(Operation::Update)?;
    Ok(Json(product))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Store failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id).or_api(Operation::Delete)?;
    state.products.delete(id).await.or_api(Operation::Delete)?;
    Ok(StatusCode::NO_CONTENT)
}
