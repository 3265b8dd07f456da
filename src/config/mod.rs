mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    match tokio::fs::read_to_string(&config_path).await {
        Ok(raw) => {
            debug!("Loading configuration from: {}", config_path);
            Ok(serde_yaml::from_str(&raw)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}
