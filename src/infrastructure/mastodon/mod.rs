//! Mastodon API clients.

mod client;
mod dto;
pub mod streaming;

pub use client::MastodonClient;
pub(crate) use client::{build_http_client, map_transport_error};
pub use streaming::{StreamingClient, user_stream_url};
