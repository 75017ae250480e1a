use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::dto::{validate_page_id, CampaignCreateRequest, CampaignUpdateRequest};
use crate::errors::ServiceError;
use crate::AppState;

use super::catalogs::ListParams;
use super::common::{created, ok};

async fn list_campaigns(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let campaigns = state
        .services
        .campaigns
        .list(params.include_archived)
        .await?;
    Ok(ok("Campañas recuperadas", campaigns))
}

async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let campaign = state.services.campaigns.get(&id).await?;
    Ok(ok("Campaña recuperada", campaign))
}

async fn create_campaign(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = CampaignCreateRequest::parse(&body)?;
    let campaign = state.services.campaigns.create(request).await?;
    Ok(created("Campaña creada con éxito", campaign))
}

async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    let request = CampaignUpdateRequest::parse(&body)?;
    let campaign = state.services.campaigns.update(&id, request).await?;
    Ok(ok("Campaña actualizada con éxito", campaign))
}

async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_page_id(&id)?;
    state.services.campaigns.delete(&id).await?;
    Ok(ok("Campaña eliminada con éxito", Value::Null))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_campaigns))
        .route("/:id", get(get_campaign))
        .route("/create", post(create_campaign))
        .route("/update/:id", put(update_campaign))
        .route("/delete/:id", delete(delete_campaign))
}
