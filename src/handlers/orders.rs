use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::dto::{validate_page_id, OrderAppendRequest, OrderCreateRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::common::{created, ok};

async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.list().await?;
    Ok(ok("Pedidos recuperados", orders))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let order = state.services.orders.get(&id).await?;
    Ok(ok("Pedido recuperado", order))
}

async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = OrderCreateRequest::parse(&body)?;
    let order = state
        .services
        .orders
        .create(&request.customer, request.products)
        .await?;
    Ok(created("Pedido creado exitosamente", order))
}

async fn append_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = OrderAppendRequest::parse(&body)?;
    let order = state
        .services
        .orders
        .add_products(&id, request.products)
        .await?;
    Ok(ok("Productos agregados al pedido exitosamente", order))
}

// Orders have no update/delete flow; the routes stay mounted so clients get
// an explicit rejection instead of a generic 404.
async fn update_order(Path(_id): Path<String>) -> Result<(), ServiceError> {
    Err(ServiceError::validation(
        "La actualización de pedidos no está soportada",
        "Use POST /new/:id para agregar productos a un pedido",
    ))
}

async fn delete_order(Path(_id): Path<String>) -> Result<(), ServiceError> {
    Err(ServiceError::validation(
        "La eliminación de pedidos no está soportada",
        "Los pedidos no se pueden eliminar por este canal",
    ))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/:id", get(get_order))
        .route("/create", post(create_order))
        .route("/new/:id", post(append_products))
        .route("/update/:id", put(update_order))
        .route("/delete/:id", delete(delete_order))
}
