mod image_fetcher_port;
mod mastodon_port;
mod streaming_port;

pub use image_fetcher_port::ImageFetcherPort;
pub use mastodon_port::{MastodonPort, PostStatusRequest};
pub use streaming_port::{StreamEvent, StreamingPort};
