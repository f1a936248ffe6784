use super::app_config::AppConfig;
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found (searched: {searched})")]
    NotFound { searched: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Locates, reads and validates the configuration file.
pub struct ConfigLoader {
    fallback_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader that falls back to `./config.toml`, then the
    /// platform config directory.
    #[must_use]
    pub fn new() -> Self {
        let mut fallback_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(path) = AppConfig::default_config_path() {
            fallback_paths.push(path);
        }
        Self { fallback_paths }
    }

    /// Creates a loader with explicit fallback paths (useful for testing).
    #[must_use]
    pub fn with_fallbacks(fallback_paths: Vec<PathBuf>) -> Self {
        Self { fallback_paths }
    }

    /// Resolves the file to read: the explicit path when given, otherwise
    /// the first fallback that exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no candidate exists.
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            return Err(ConfigError::NotFound {
                searched: path.display().to_string(),
            });
        }

        self.fallback_paths
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                searched: self
                    .fallback_paths
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Loads and validates the application configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, malformed,
    /// or holds invalid server settings.
    pub fn load(&self, explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = self.resolve(explicit)?;
        debug!(path = %path.display(), "Reading configuration");

        let content = fs::read_to_string(&path)?;
        let mut config = toml::from_str::<AppConfig>(&content)?;
        validate(&config)?;

        info!("Loaded configuration from {:?}", path);
        config.config = Some(path);
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let server = &config.server;

    let url = Url::parse(server.base_url())
        .map_err(|e| ConfigError::invalid("server.mastodon_server", e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "server.mastodon_server",
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::invalid("server.mastodon_server", "missing host"));
    }

    if server.token().is_none() {
        return Err(ConfigError::invalid(
            "server.access_token",
            "must be non-empty and contain no whitespace",
        ));
    }

    if let Some(streaming) = &server.streaming_url {
        let url = Url::parse(streaming.trim())
            .map_err(|e| ConfigError::invalid("server.streaming_url", e.to_string()))?;
        if !matches!(url.scheme(), "ws" | "wss" | "http" | "https") {
            return Err(ConfigError::invalid(
                "server.streaming_url",
                format!("unsupported scheme `{}`", url.scheme()),
            ));
        }
    }

    Ok(())
}
