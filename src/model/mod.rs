mod backend;

pub use backend::{HF_TOKEN_ENV, HfInferenceBackend, NerBackend, RawEntity};

use crate::{Error, Result, config::ModelConfig};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Closed label vocabulary the model is asked to detect. Fixed here rather
/// than per-request so detection sensitivity cannot vary between callers.
pub const ENTITY_LABELS: [&str; 4] = ["TYPE", "BRAND", "VOLUME", "PERCENT"];

/// Minimum confidence for a span to be emitted. Spans below this are
/// filtered by the model runtime and never reach the host.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Entity span in the host's internal shape. Byte offsets into the UTF-8
/// input text, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Point-in-time snapshot of the model lifecycle, safe to read while a load
/// or prediction is in flight.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub model_identifier: String,
    pub is_ready: bool,
    pub model_type: String,
}

enum LoadState {
    Unloaded,
    Loading,
    Ready(Arc<dyn NerBackend>),
    Failed(String),
}

/// Owns the model lifecycle: `Unloaded -> Loading -> Ready | Failed`.
/// `Ready` never regresses and `Failed` is terminal for the process
/// lifetime; there is no reload or retry policy.
pub struct ModelHost {
    config: ModelConfig,
    state: RwLock<LoadState>,
}

impl ModelHost {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            state: RwLock::new(LoadState::Unloaded),
        }
    }

    /// Constructs a host that is already `Ready` with the given backend.
    /// Dependency-injection seam for tests and embedding.
    pub fn preloaded(identifier: impl Into<String>, backend: Arc<dyn NerBackend>) -> Self {
        Self {
            config: ModelConfig {
                identifier: identifier.into(),
                ..ModelConfig::default()
            },
            state: RwLock::new(LoadState::Ready(backend)),
        }
    }

    /// One-shot model load. On failure the host stays permanently not ready
    /// and the error is returned to the startup orchestrator, which decides
    /// whether to abort or keep serving degraded.
    pub async fn load(&self) -> Result<ModelStatus> {
        {
            let mut state = self.state.write().await;
            if matches!(*state, LoadState::Ready(_)) {
                warn!("Model {} is already loaded", self.config.identifier);
                drop(state);
                return Ok(self.status().await);
            }
            *state = LoadState::Loading;
        }

        info!("Loading model {}", self.config.identifier);
        match HfInferenceBackend::connect(&self.config).await {
            Ok(backend) => {
                *self.state.write().await = LoadState::Ready(Arc::new(backend));
                info!("Model {} loaded successfully", self.config.identifier);
                Ok(self.status().await)
            }
            Err(e) => {
                error!("Failed to load model {}: {}", self.config.identifier, e);
                *self.state.write().await = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn status(&self) -> ModelStatus {
        let is_ready = matches!(*self.state.read().await, LoadState::Ready(_));
        ModelStatus {
            model_identifier: self.config.identifier.clone(),
            is_ready,
            model_type: "GLiNER".to_string(),
        }
    }

    /// Runs entity extraction over `text`. Requires the host to be `Ready`;
    /// fails with `Error::ModelNotLoaded` otherwise. The backend handle is
    /// cloned out of the lock so concurrent requests do not serialize on it.
    pub async fn predict(&self, text: &str) -> Result<Vec<Entity>> {
        let backend = match &*self.state.read().await {
            LoadState::Ready(backend) => Arc::clone(backend),
            _ => return Err(Error::ModelNotLoaded),
        };

        let raw = backend
            .extract(text, &ENTITY_LABELS, CONFIDENCE_THRESHOLD)
            .await?;

        let byte_len = text.len();
        let mut entities = Vec::with_capacity(raw.len());
        for span in raw {
            if span.start > span.end || span.end > byte_len {
                warn!(
                    "Dropping out-of-bounds span {}..{} ({}) for input of {} bytes",
                    span.start, span.end, span.label, byte_len
                );
                continue;
            }
            entities.push(Entity {
                start: span.start,
                end: span.end,
                label: span.label,
            });
        }

        debug!("Extracted {} entities", entities.len());
        Ok(entities)
    }
}
