pub mod config;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notion;
pub mod repositories;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use axum::routing::get;
use axum::Router;
use http::HeaderValue;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::handlers::AppServices;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: AppServices,
}

async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Entity routers mounted under `/api/v1/webhook`.
pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalogs", handlers::catalogs::routes())
        .nest("/campaigns", handlers::campaigns::routes())
        .nest("/catalog-campaign", handlers::catalog_campaigns::routes())
        .nest("/customers", handlers::customers::routes())
        .nest("/products", handlers::products::routes())
        .nest("/orders", handlers::orders::routes())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/webhook", webhook_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
