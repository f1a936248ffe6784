//! jpeg-bot - A Mastodon bot that answers mentions with badly compressed JPEGs.
//!
//! This crate listens on the Mastodon user stream, collects the images
//! attached to a mention (or to the post it replies to), re-encodes each one
//! as a very low quality JPEG and replies with the result.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "jpeg-bot";
