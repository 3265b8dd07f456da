pub mod handlers;
pub mod types;

use crate::{Result, config::Config, model::ModelHost};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/predict", post(handlers::predict))
        .route("/api/predict/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let model = Arc::new(ModelHost::new(config.model.clone()));

    // The load runs in the background so the health probe is answerable
    // while the model is still loading. A failed load leaves the service up
    // in a degraded state: /api/predict answers 503 until restart.
    let loader = Arc::clone(&model);
    tokio::spawn(async move {
        match loader.load().await {
            Ok(status) => info!("Model {} ready to serve", status.model_identifier),
            Err(e) => error!("Model load failed, continuing degraded: {}", e),
        }
    });

    let app = router(AppState { model });

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
