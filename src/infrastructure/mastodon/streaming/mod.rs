//! Mastodon streaming API client.

mod client;
mod codec;
mod connection;
mod constants;

pub use client::{StreamingClient, user_stream_url};
pub use codec::{EventParser, StreamMessage};
pub use connection::WebSocketConnection;
