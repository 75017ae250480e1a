use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::dto::{validate_page_id, CatalogCampaignCreateRequest, CatalogCampaignUpdateRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::common::{created, ok};

async fn list_links(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let links = state.services.catalog_campaigns.list().await?;
    Ok(ok("Catálogos campañas recuperados", links))
}

async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let link = state.services.catalog_campaigns.get(&id).await?;
    Ok(ok("Catálogo campaña recuperado", link))
}

async fn create_link(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CatalogCampaignCreateRequest::parse(&body)?;
    let link = state
        .services
        .catalog_campaigns
        .create(&request.campaign_id, &request.catalog_id)
        .await?;
    Ok(created("Catálogo campaña creado exitosamente", link))
}

async fn update_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = CatalogCampaignUpdateRequest::parse(&body)?;
    let link = state
        .services
        .catalog_campaigns
        .update(&id, request.campaign_id, request.catalog_id)
        .await?;
    Ok(ok("Catálogo campaña actualizado exitosamente", link))
}

async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    state.services.catalog_campaigns.delete(&id).await?;
    Ok(ok("Catálogo campaña eliminado exitosamente", Value::Null))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_links))
        .route("/:id", get(get_link))
        .route("/create", post(create_link))
        .route("/update/:id", put(update_link))
        .route("/delete/:id", delete(delete_link))
}
