//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Image download.
pub mod image;
/// Mastodon REST and streaming clients.
pub mod mastodon;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigLoader, LogLevel, ServerConfig};
pub use image::HttpImageDownloader;
pub use mastodon::{MastodonClient, StreamingClient};
