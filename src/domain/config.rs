//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the bot identity, the resource API, the error channel, the brain
//! backend and the chat services. A handful of environment variables override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const ENV_API_URL: &str = "HACKBOT_API_URL";
pub const ENV_API_PASSWORD: &str = "HACKBOT_PASSWORD";
pub const ENV_ERROR_CHANNEL: &str = "HACKBOT_ERROR_CHANNEL";
pub const ENV_BOT_NAME: &str = "HACKBOT_NAME";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub errors: ErrorsConfig,
    #[serde(default)]
    pub brain: BrainConfig,
    #[serde(default)]
    pub services: ServicesConfig,
}

/// How the bot is addressed and how long it keeps listening after "OK <name>".
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "default_attention_seconds")]
    pub attention_seconds: i64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            alias: None,
            attention_seconds: default_attention_seconds(),
        }
    }
}

fn default_bot_name() -> String {
    "hackbot".to_string()
}

fn default_attention_seconds() -> i64 {
    30
}

/// Resource API endpoint and the shared password paired with each requester identity.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    #[serde(default = "default_api_password")]
    pub password: String,
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            password: default_api_password(),
            timeout_seconds: default_api_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "http://api.hack24.co.uk/api".to_string()
}

fn default_api_password() -> String {
    "PASSWORD NOT SET".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ErrorsConfig {
    /// Operations channel receiving error diagnostics
    #[serde(default = "default_error_channel")]
    pub channel: String,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        Self {
            channel: default_error_channel(),
        }
    }
}

fn default_error_channel() -> String {
    "#hackbot-errors".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrainBackend {
    Memory,
    #[default]
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrainConfig {
    #[serde(default)]
    pub backend: BrainBackend,
    /// JSON file used by the file backend
    #[serde(default = "default_brain_path")]
    pub path: String,
    /// Connection URL for the redis backend
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            backend: BrainBackend::default(),
            path: default_brain_path(),
            url: None,
        }
    }
}

fn default_brain_path() -> String {
    "data/brain.json".to_string()
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub matrix: Option<MatrixConfig>,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AppConfig {
    /// Reads and parses the YAML file, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML")
    }

    /// Overrides file values with whatever `lookup` returns for the known variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(password) = lookup(ENV_API_PASSWORD) {
            self.api.password = password;
        }
        if let Some(channel) = lookup(ENV_ERROR_CHANNEL) {
            self.errors.channel = channel;
        }
        if let Some(name) = lookup(ENV_BOT_NAME) {
            self.bot.name = name;
        }
    }
}
