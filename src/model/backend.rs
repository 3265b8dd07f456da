use crate::{Error, Result, config::ModelConfig};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

/// Environment variable holding the optional model hub access token.
pub const HF_TOKEN_ENV: &str = "HUGGINGFACE_HUB_TOKEN";

/// Entity span as emitted by the model runtime. Offsets are byte offsets
/// into the UTF-8 input, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEntity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// The opaque model reference behind the Model Host. Implementations must
/// support concurrent invocation without request-level locking.
#[async_trait]
pub trait NerBackend: Send + Sync {
    async fn extract(
        &self,
        text: &str,
        labels: &[&str],
        threshold: f32,
    ) -> Result<Vec<RawEntity>>;
}

/// Hosted-inference backend talking to a Hugging Face style API.
pub struct HfInferenceBackend {
    http: reqwest::Client,
    inference_url: String,
    token: Option<String>,
}

impl HfInferenceBackend {
    /// Performs the load step: reads the optional access token from the
    /// environment and verifies the model is reachable on the hub. Any
    /// failure surfaces as `Error::ModelLoad`.
    pub async fn connect(config: &ModelConfig) -> Result<Self> {
        let token = std::env::var(HF_TOKEN_ENV).ok().filter(|t| !t.is_empty());
        match &token {
            Some(_) => info!("Using model hub access token from {}", HF_TOKEN_ENV),
            None => warn!("{} not set, attempting anonymous model access", HF_TOKEN_ENV),
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("product-ner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::model_load(format!("failed to build HTTP client: {e}")))?;

        let hub_url = format!(
            "{}/api/models/{}",
            config.hub_base_url.trim_end_matches('/'),
            config.identifier
        );
        debug!("Verifying model access at {}", hub_url);

        let mut request = http.get(&hub_url);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::model_load(format!("model hub unreachable: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::model_load(format!(
                "model hub returned {} for {}",
                response.status(),
                config.identifier
            )));
        }

        Ok(Self {
            http,
            inference_url: format!(
                "{}/models/{}",
                config.inference_base_url.trim_end_matches('/'),
                config.identifier
            ),
            token,
        })
    }
}

#[async_trait]
impl NerBackend for HfInferenceBackend {
    async fn extract(
        &self,
        text: &str,
        labels: &[&str],
        threshold: f32,
    ) -> Result<Vec<RawEntity>> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "labels": labels,
                "threshold": threshold,
            },
        });

        let mut request = self.http.post(&self.inference_url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::prediction(format!("inference endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::prediction(format!(
                "inference endpoint returned {status}: {detail}"
            )));
        }

        response
            .json::<Vec<RawEntity>>()
            .await
            .map_err(|e| Error::prediction(format!("malformed inference response: {e}")))
    }
}
