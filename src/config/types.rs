//! Core configuration types.

use super::validation::{ValidationError, validate};
use super::{LimitsConfig, ListenConfig};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "tinyircd.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", describe(.0))]
    Invalid(Vec<ValidationError>),
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity and policy.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Per-connection limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load `explicit` if given. Otherwise load [`DEFAULT_CONFIG_PATH`] when it
    /// exists, falling back to built-in defaults.
    pub fn load_or_default(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the source of numeric replies.
    #[serde(default = "default_name")]
    pub name: String,
    /// Network name shown in the welcome message.
    #[serde(default = "default_network")]
    pub network: String,
    /// Connection password. Empty or absent means none.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether the password is checked when registration completes.
    #[serde(default = "default_true")]
    pub enforce_password: bool,
    /// Relay free-text lines to the sender's last joined channel.
    #[serde(default = "default_true")]
    pub plain_text: bool,
}

impl ServerConfig {
    /// The password clients must present, if one is enforced.
    pub fn required_password(&self) -> Option<&str> {
        if !self.enforce_password {
            return None;
        }
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            network: default_network(),
            password: None,
            enforce_password: true,
            plain_text: true,
        }
    }
}

fn default_name() -> String {
    "irc.tinyircd.local".to_string()
}

fn default_network() -> String {
    "TinyNet".to_string()
}

fn default_true() -> bool {
    true
}
