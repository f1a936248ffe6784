//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::entities::AccessToken;

pub(crate) const APP_NAME: &str = "jpeg-bot";
pub(crate) const APP_QUALIFIER: &str = "social";
pub(crate) const APP_ORGANIZATION: &str = "jpeg-bot";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Mastodon server connection settings, the `[server]` table.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the instance, e.g. `https://mastodon.example`.
    pub mastodon_server: String,

    /// OAuth client secret of the registered application.
    pub client_secret: String,

    /// OAuth access token of the bot account.
    pub access_token: String,

    /// Streaming endpoint override, for instances that serve it from a
    /// separate host.
    #[serde(default)]
    pub streaming_url: Option<String>,

    /// Per-request timeout for REST and download calls.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Returns the validated access token, if well formed.
    #[must_use]
    pub fn token(&self) -> Option<AccessToken> {
        AccessToken::new(self.access_token.as_str())
    }

    /// Server URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.mastodon_server.trim().trim_end_matches('/')
    }

    /// Request timeout, if one is configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("mastodon_server", &self.mastodon_server)
            .field("client_secret", &"<redacted>")
            .field(
                "access_token",
                &AccessToken::new_unchecked(self.access_token.as_str()).masked(),
            )
            .field("streaming_url", &self.streaming_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path the values were read from.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Mastodon server settings.
    pub server: ServerConfig,
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }
}
