use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use beauty_webhook_api as api;

use api::handlers::AppServices;
use api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(&config.log_level, config.log_json);

    let services = AppServices::from_config(&config);
    let state = AppState {
        config: Arc::new(config.clone()),
        services,
    };

    let router = api::build_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, environment = %config.environment, "webhook API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
