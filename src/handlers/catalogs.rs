use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::dto::{validate_page_id, CatalogRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::common::{created, ok};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub include_archived: bool,
}

async fn list_catalogs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let catalogs = state.services.catalogs.list(params.include_archived).await?;
    Ok(ok("Catálogos recuperados", catalogs))
}

async fn catalog_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.services.catalogs.stats().await?;
    Ok(ok("Estadísticas de catálogos recuperadas", stats))
}

async fn get_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let catalog = state.services.catalogs.get(&id).await?;
    Ok(ok("Catálogo recuperado", catalog))
}

async fn create_catalog(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CatalogRequest::parse(&body)?;
    let catalog = state.services.catalogs.create(&request.name).await?;
    Ok(created("Catálogo creado exitosamente", catalog))
}

async fn update_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = CatalogRequest::parse(&body)?;
    let catalog = state.services.catalogs.update(&id, &request.name).await?;
    Ok(ok("Catálogo actualizado exitosamente", catalog))
}

async fn archive_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let catalog = state.services.catalogs.archive(&id).await?;
    Ok(ok("Catálogo archivado exitosamente", catalog))
}

async fn restore_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let catalog = state.services.catalogs.restore(&id).await?;
    Ok(ok("Catálogo restaurado exitosamente", catalog))
}

async fn delete_catalog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    state.services.catalogs.delete(&id).await?;
    Ok(ok("Catálogo eliminado exitosamente", Value::Null))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalogs))
        .route("/stats", get(catalog_stats))
        .route("/:id", get(get_catalog))
        .route("/create", post(create_catalog))
        .route("/update/:id", put(update_catalog))
        .route("/archive/:id", post(archive_catalog))
        .route("/restore/:id", post(restore_catalog))
        .route("/delete/:id", delete(delete_catalog))
}
