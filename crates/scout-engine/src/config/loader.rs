use super::schema::ScoutConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Overrides `baseUrl` from any loaded file.
pub const BASE_URL_ENV: &str = "SCOUT_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./scout.yaml
    /// 2. ./.e2e-agent.config.json
    /// 3. ~/.scout/config.yaml
    /// 4. Default configuration
    pub async fn load_default() -> Result<ScoutConfig, ConfigError> {
        for local in ["./scout.yaml", "./.e2e-agent.config.json"] {
            let local_config = PathBuf::from(local);
            if local_config.exists() {
                return Self::load_from(&local_config).await;
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".scout").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Self::finish(ScoutConfig::default())
    }

    /// Reads a `.json` file as JSON, anything else as YAML.
    pub async fn load_from(path: &Path) -> Result<ScoutConfig, ConfigError> {
        debug!(path = %path.display(), "Loading config");
        let content = tokio::fs::read_to_string(path).await?;
        let config: ScoutConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Self::finish(config)
    }

    fn finish(mut config: ScoutConfig) -> Result<ScoutConfig, ConfigError> {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            config.base_url = url.trim().to_string();
        }
        validate_base_url(&config.base_url)?;
        Ok(config)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    url::Url::parse(base_url)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })
}
