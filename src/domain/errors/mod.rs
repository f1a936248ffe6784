//! Domain error types.

mod api_error;
mod image_error;
mod processing_error;
mod streaming_error;

pub use api_error::ApiError;
pub use image_error::ImageError;
pub use processing_error::ProcessingError;
pub use streaming_error::{StreamingError, StreamingResult};
