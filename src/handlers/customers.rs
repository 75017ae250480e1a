use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::dto::{validate_page_id, CustomerRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::catalogs::ListParams;
use super::common::{created, ok};

async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state
        .services
        .customers
        .list(params.include_archived)
        .await?;
    Ok(ok("Clientes recuperados", customers))
}

async fn customer_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.services.customers.stats().await?;
    Ok(ok("Estadísticas de clientes recuperadas", stats))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let customer = state.services.customers.get(&id).await?;
    Ok(ok("Cliente recuperado", customer))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CustomerRequest::parse(&body)?;
    let customer = state.services.customers.create(&request.name).await?;
    Ok(created("Cliente creado exitosamente", customer))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = CustomerRequest::parse(&body)?;
    let customer = state.services.customers.update(&id, &request.name).await?;
    Ok(ok("Cliente actualizado exitosamente", customer))
}

async fn archive_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let customer = state.services.customers.archive(&id).await?;
    Ok(ok("Cliente archivado exitosamente", customer))
}

async fn restore_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let customer = state.services.customers.restore(&id).await?;
    Ok(ok("Cliente restaurado exitosamente", customer))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    state.services.customers.delete(&id).await?;
    Ok(ok("Cliente eliminado exitosamente", Value::Null))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/stats", get(customer_stats))
        .route("/:id", get(get_customer))
        .route("/create", post(create_customer))
        .route("/update/:id", put(update_customer))
        .route("/archive/:id", post(archive_customer))
        .route("/restore/:id", post(restore_customer))
        .route("/delete/:id", delete(delete_customer))
}
