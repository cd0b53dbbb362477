//! Configuration loader and validator for the gallery client.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub server: Server,
    pub gallery: Gallery,
    pub polling: Polling,
    pub links: Links,
}

/// Library service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    /// API base; endpoint paths join underneath, so it must end with `/`.
    pub api_base_url: String,
    /// Base the media assets are served from; must end with `/`.
    pub media_base_url: String,
}

/// Grid and pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gallery {
    pub page_size: u32,
    /// Bounded wait for an element's first decode before a page settles.
    pub settle_ms: u64,
    /// Substitute for missing or non-positive media dimensions.
    pub default_dimension: u32,
}

/// Post-download sync polling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polling {
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
}

/// External deep-link construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    /// Artwork page base; the extracted external id is appended directly.
    pub artwork_base_url: String,
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.server.api_base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("server.api_base_url must be non-empty"));
    }
    if !cfg.server.api_base_url.ends_with('/') {
        return Err(ConfigError::Invalid("server.api_base_url must end with '/'"));
    }
    if cfg.server.media_base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("server.media_base_url must be non-empty"));
    }
    if !cfg.server.media_base_url.ends_with('/') {
        return Err(ConfigError::Invalid("server.media_base_url must end with '/'"));
    }

    if cfg.gallery.page_size == 0 {
        return Err(ConfigError::Invalid("gallery.page_size must be > 0"));
    }
    if cfg.gallery.settle_ms == 0 {
        return Err(ConfigError::Invalid("gallery.settle_ms must be > 0"));
    }
    if cfg.gallery.default_dimension == 0 {
        return Err(ConfigError::Invalid("gallery.default_dimension must be > 0"));
    }

    if cfg.polling.poll_interval_ms == 0 {
        return Err(ConfigError::Invalid("polling.poll_interval_ms must be > 0"));
    }
    if cfg.polling.poll_max_attempts == 0 {
        return Err(ConfigError::Invalid("polling.poll_max_attempts must be > 0"));
    }

    if cfg.links.artwork_base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("links.artwork_base_url must be non-empty"));
    }

    Ok(())
}

/// A complete example configuration document.
pub fn example() -> &'static str {
    r#"server:
  api_base_url: "http://127.0.0.1:8000/api/"
  media_base_url: "http://127.0.0.1:8000/downloads/"

gallery:
  page_size: 30
  settle_ms: 3000
  default_dimension: 800

polling:
  poll_interval_ms: 4000
  poll_max_attempts: 60

links:
  artwork_base_url: "https://www.pixiv.net/en/artworks/"
"#
}
