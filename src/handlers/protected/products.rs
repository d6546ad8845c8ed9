use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::models::product::body_object;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

pub const DEFAULT_LIMIT: i64 = 20;
pub const DEFAULT_SKIP: i64 = 0;

#[derive(Debug, Default)]
pub struct ListQuery {
    /// Maximum number of products to return. Unparseable values fall back to 20.
    pub limit: Option<String>,
    /// Number of leading products to skip. Unparseable values fall back to 0.
    pub skip: Option<String>,
}

impl ListQuery {
    /// Build from raw query pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
        Self {
            limit: first("limit"),
            skip: first("skip"),
        }
    }

    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    pub fn skip(&self) -> i64 {
        parse_or(self.skip.as_deref(), DEFAULT_SKIP)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn product_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("Product not found"))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Option<Value> {
    payload.ok().map(|Json(value)| value)
}

/// GET /products - list products windowed by `skip` then `limit`
pub async fn list(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let query = match pairs {
        Ok(Query(pairs)) => ListQuery::from_pairs(&pairs),
        Err(_) => ListQuery::default(),
    };
    let products = state.store.list(query.skip(), query.limit()).await?;
    Ok(Json(products))
}

/// GET /products/:id - show a single product
pub async fn get(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<Json<Product>> {
    let id = product_id(path)?;
    let product = state.store.find_404(id).await?;
    Ok(Json(product))
}

/// POST /products - create a product from `{title, description, price}`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let body = body_object(json_body(payload))?;
    let new_product = NewProduct::from_body(&body)?;

    let product = state.store.insert(new_product).await?;
    tracing::info!("Created product {} ({})", product.id, product.title);

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/:id - overwrite only the supplied fields
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = product_id(path)?;
    let mut product = state.store.find_404(id).await?;

    let body = body_object(json_body(payload))?;
    product.apply(ProductPatch::from_body(&body)?);

    state.store.update(&product).await?;
    tracing::info!("Updated product {}", product.id);

    Ok(Json(product))
}

/// DELETE /products/:id - remove a product
pub async fn delete(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<Json<Value>> {
    let id = product_id(path)?;
    state.store.delete(id).await?;
    tracing::info!("Deleted product {}", id);

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
