//! Configuration management for the wikisearch service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, WikiSearchError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Proxy variables in lookup order; the first non-empty one wins
const PROXY_ENV_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub outline: OutlineConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Outline API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutlineConfig {
    /// API root, e.g. `https://wiki.example.com/api`
    #[serde(default)]
    pub base_url: String,

    /// Bearer token forwarded on every search call
    #[serde(default)]
    pub token: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,

    /// Proxy used to tunnel outbound calls
    #[serde(default)]
    pub proxy_url: Option<String>,
}

/// Search tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Page size requested from Outline
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

fn default_limit() -> usize {
    2
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_sec: default_timeout(),
            proxy_url: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WikiSearchError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The TOML file is looked up in this order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. `WIKISEARCH_CONFIG` env var
    /// 3. `<config dir>/wikisearch/config.toml`
    /// 4. `./wikisearch.toml`
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate_file(explicit) {
            Some(path) => {
                tracing::debug!("Loading config file {:?}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    fn locate_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = env::var("WIKISEARCH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let user_config = dirs::config_dir().map(|dir| dir.join("wikisearch").join("config.toml"));
        if let Some(path) = user_config.filter(|p| p.exists()) {
            return Some(path);
        }

        let local = PathBuf::from("wikisearch.toml");
        local.exists().then_some(local)
    }

    /// Merge configuration with environment variables
    ///
    /// Unparseable or zero numeric values are ignored and the current
    /// value is kept.
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Some(port) = parse_positive::<u16>("PORT") {
            self.server.port = port;
        }

        // Outline configuration
        if let Ok(base_url) = env::var("OUTLINE_BASE_URL") {
            self.outline.base_url = base_url;
        }
        if let Ok(token) = env::var("OUTLINE_TOKEN") {
            self.outline.token = token;
        }
        if let Some(proxy) = proxy_from_env() {
            self.outline.proxy_url = Some(proxy);
        }

        // Search configuration
        if let Some(limit) = parse_positive::<usize>("SEARCH_LIMIT") {
            self.search.limit = limit;
        }

        // Logging configuration
        if let Ok(format) = env::var("WIKISEARCH_LOG_FORMAT") {
            match format.to_ascii_lowercase().as_str() {
                "json" => self.logging.format = LogFormat::Json,
                "text" => self.logging.format = LogFormat::Text,
                other => tracing::warn!("Ignoring unknown log format '{}'", other),
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.outline.base_url.trim().is_empty() || self.outline.token.trim().is_empty() {
            return Err(WikiSearchError::ConfigError(
                "OUTLINE_BASE_URL and OUTLINE_TOKEN must be configured in environment variables"
                    .to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(WikiSearchError::ConfigError(
                "Port must be non-zero".to_string(),
            ));
        }

        if self.outline.timeout_sec == 0 {
            return Err(WikiSearchError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.search.limit == 0 {
            return Err(WikiSearchError::ConfigError(
                "Search limit must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Outline base URL: {}", self.outline.base_url);
        tracing::info!(
            "  Outline token: {}",
            if self.outline.token.is_empty() {
                "<unset>"
            } else {
                "<redacted>"
            }
        );
        tracing::info!("  Request timeout: {}s", self.outline.timeout_sec);
        tracing::info!(
            "  Proxy: {}",
            if self.outline.proxy_url.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  Search limit: {}", self.search.limit);
    }
}

fn parse_positive<T>(var: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    env::var(var)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

fn proxy_from_env() -> Option<String> {
    PROXY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
