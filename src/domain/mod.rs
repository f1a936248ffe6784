//! Domain layer with core entities, errors, and port definitions.

/// Event loop lifecycle.
pub mod connection;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use connection::BotState;
pub use entities::{Notification, Status};
pub use errors::{ApiError, ImageError, ProcessingError, StreamingError};
pub use ports::{ImageFetcherPort, MastodonPort, StreamEvent, StreamingPort};
