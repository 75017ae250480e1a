use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::dto::{validate_page_id, ProductRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::common::{created, ok};

async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.list().await?;
    Ok(ok("Productos recuperados", products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let product = state.services.products.get(&id).await?;
    Ok(ok("Producto recuperado", product))
}

async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = ProductRequest::parse_capitalized(&body)?;
    let product = state.services.products.create(request).await?;
    Ok(created("Producto agregado exitosamente", product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = ProductRequest::parse(&body)?;
    let product = state.services.products.update(&id, request).await?;
    Ok(ok("Producto actualizado exitosamente", product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    state.services.products.delete(&id).await?;
    Ok(ok("Producto eliminado exitosamente", Value::Null))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/create", post(create_product))
        .route("/update/:id", put(update_product))
        .route("/delete/:id", delete(delete_product))
}
