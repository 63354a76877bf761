//! Configuration loading and validation for ASKBOT.
//!
//! Loads configuration from `~/.askbot/config.toml` with environment
//! variable overrides. A missing file means defaults. Missing API keys are
//! startup warnings, not hard errors: the assistant still runs, model calls
//! and scraping simply fail or are skipped until the keys are set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.askbot/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative-model API key. Env: `GEMINI_API_KEY` or
    /// `GOOGLE_GEMINI_API_KEY` (either name is accepted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    /// Rendering-proxy API key. Env: `SCRAPER_API_KEY`. Without it the
    /// bootstrapper never scrapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraper_api_key: Option<String>,

    /// Model used for completions.
    #[serde(default = "default_model")]
    pub model: String,

    /// The FAQ page to scrape.
    #[serde(default = "default_faq_url")]
    pub faq_url: String,

    /// Rendering-proxy endpoint.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// SQLite database file holding the FAQ cache.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".into()
}
fn default_faq_url() -> String {
    "https://www.jovemprogramador.com.br/duvidas.php".into()
}
fn default_proxy_url() -> String {
    "http://api.scraperapi.com".into()
}
fn default_db_path() -> String {
    "duvidas_jp.db".into()
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("scraper_api_key", &redact(&self.scraper_api_key))
            .field("model", &self.model)
            .field("faq_url", &self.faq_url)
            .field("proxy_url", &self.proxy_url)
            .field("db_path", &self.db_path)
            .field("gateway", &self.gateway)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    // The address the web front end targets.
    5000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.askbot/config.toml).
    ///
    /// Environment variables take precedence over file values:
    /// - `GEMINI_API_KEY` / `GOOGLE_GEMINI_API_KEY`
    /// - `SCRAPER_API_KEY`
    /// - `ASKBOT_MODEL`
    /// - `ASKBOT_DB`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(key) = env_var("GEMINI_API_KEY").or_else(|| env_var("GOOGLE_GEMINI_API_KEY")) {
            self.gemini_api_key = Some(key);
        }
        if let Some(key) = env_var("SCRAPER_API_KEY") {
            self.scraper_api_key = Some(key);
        }
        if let Some(model) = env_var("ASKBOT_MODEL") {
            self.model = model;
        }
        if let Some(db) = env_var("ASKBOT_DB") {
            self.db_path = db;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".askbot")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model must not be empty".into(),
            ));
        }
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.port must not be 0".into(),
            ));
        }
        for (name, url) in [("faq_url", &self.faq_url), ("proxy_url", &self.proxy_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            scraper_api_key: None,
            model: default_model(),
            faq_url: default_faq_url(),
            proxy_url: default_proxy_url(),
            db_path: default_db_path(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
