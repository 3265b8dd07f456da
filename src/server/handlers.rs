use super::types::{Entity, ErrorResponse, HealthResponse, PredictRequest, PredictResponse};
use crate::{Error, Result, model::ModelHost};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const MIN_INPUT_CHARS: usize = 1;
pub const MAX_INPUT_CHARS: usize = 1000;

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelHost>,
}

/// Rejects input outside the accepted length range. Length is counted in
/// characters, not bytes, so Cyrillic queries get the full budget.
pub fn validate_input(input: &str) -> Result<()> {
    let chars = input.chars().count();
    if chars < MIN_INPUT_CHARS || chars > MAX_INPUT_CHARS {
        return Err(Error::invalid_input(format!(
            "input must be between {MIN_INPUT_CHARS} and {MAX_INPUT_CHARS} characters, got {chars}"
        )));
    }
    Ok(())
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> std::result::Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = validate_input(&request.input) {
        warn!("Rejecting request: {}", e);
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                detail: e.to_string(),
            }),
        ));
    }

    // Single readiness gate before any model interaction. No queueing or
    // waiting: a cold or failed model fails every request cheaply.
    let status = state.model.status().await;
    if !status.is_ready {
        warn!("Rejecting request: model {} not loaded", status.model_identifier);
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                detail: "NER model is not loaded yet, try again later".to_string(),
            }),
        ));
    }

    info!("Processing prediction request ({} chars)", request.input.chars().count());

    match state.model.predict(&request.input).await {
        Ok(entities) => {
            info!("Found {} entities", entities.len());
            let entities = entities
                .into_iter()
                .map(|e| Entity {
                    start_index: e.start,
                    end_index: e.end,
                    entity: e.label,
                })
                .collect();
            Ok(Json(PredictResponse::new(entities, request.input)))
        }
        // The gate above makes this unreachable via the public path, but the
        // host still guards the precondition.
        Err(Error::ModelNotLoaded) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                detail: "NER model is not loaded yet, try again later".to_string(),
            }),
        )),
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

/// Liveness/readiness probe. Never fails; always embeds the current model
/// status snapshot.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let model_info = state.model.status().await;

    if model_info.is_ready {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                message: "Model is loaded and ready",
                model_info,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
                message: "Model is not loaded",
                model_info,
            }),
        )
    }
}
