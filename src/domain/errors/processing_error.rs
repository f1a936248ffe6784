//! Per-image pipeline failures and their reply wording.

use thiserror::Error;

use super::{ApiError, ImageError};

/// Failure of one unit of work in the reply workflow.
///
/// The `Display` output is quoted verbatim in error replies.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Neither the mention nor its parent carried an image.
    #[error("No images found to process.")]
    NoImagesFound,

    /// Downloading the attachment failed.
    #[error("Error compressing image: failed to download image: {0}")]
    Fetch(#[source] ApiError),

    /// Decoding or re-encoding failed.
    #[error("Error compressing image: {}", image_detail(.0))]
    Image(#[from] ImageError),

    /// The media endpoint rejected the upload.
    #[error("Error uploading media: {0}")]
    Upload(#[source] ApiError),

    /// The reply status could not be posted.
    #[error("Error posting reply: {0}")]
    Post(#[source] ApiError),
}

impl ProcessingError {
    /// Short stage name for logs.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::NoImagesFound => "collect",
            Self::Fetch(_) => "fetch",
            Self::Image(e) if e.is_decode_failure() => "decode",
            Self::Image(_) => "encode",
            Self::Upload(_) => "upload",
            Self::Post(_) => "post",
        }
    }
}

fn image_detail(error: &ImageError) -> String {
    if error.is_decode_failure() {
        format!("error decoding image: {error}")
    } else {
        error.to_string()
    }
}
