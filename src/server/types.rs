use crate::model::ModelStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub input: String,
}

/// Wire shape of one extracted span. Indices are byte offsets into
/// `input_text`, `end_index` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub start_index: usize,
    pub end_index: usize,
    pub entity: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub entities: Vec<Entity>,
    pub input_text: String,
    pub total_entities: usize,
}

impl PredictResponse {
    /// `total_entities` is fixed to the sequence length here and never
    /// recomputed downstream.
    pub fn new(entities: Vec<Entity>, input_text: String) -> Self {
        let total_entities = entities.len();
        Self {
            entities,
            input_text,
            total_entities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub model_info: ModelStatus,
}
