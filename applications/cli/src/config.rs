/// CLI configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tunebox_playback::PlaybackConfig;
use tunebox_server_client::ServerConfig;

/// File read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tunebox.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tunebox.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Load(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (TUNEBOX_SERVER__URL, ...)
        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "server.url is required (set TUNEBOX_SERVER__URL)".to_string(),
            ));
        }

        let volume = self.playback.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::Invalid(format!(
                "playback.initial_volume must be between 0 and 1, got {}",
                volume
            )));
        }

        Ok(())
    }

    /// Connection settings for the server client
    pub fn server_config(&self) -> ServerConfig {
        match &self.server.access_token {
            Some(token) => ServerConfig::with_token(&self.server.url, token),
            None => ServerConfig::new(&self.server.url),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TUNEBOX")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
