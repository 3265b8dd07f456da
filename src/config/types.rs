use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hub identifier of the pretrained NER model.
    #[serde(default = "default_model_identifier")]
    pub identifier: String,
    /// Base URL of the model hub used to verify access at load time.
    #[serde(default = "default_hub_base_url")]
    pub hub_base_url: String,
    /// Base URL of the hosted inference endpoint.
    #[serde(default = "default_inference_base_url")]
    pub inference_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            identifier: default_model_identifier(),
            hub_base_url: default_hub_base_url(),
            inference_base_url: default_inference_base_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_identifier() -> String {
    "urchade/gliner_base".to_string()
}

fn default_hub_base_url() -> String {
    "https://huggingface.co".to_string()
}

fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}
