//! Image decoding and encoding errors.

use thiserror::Error;

/// Image pipeline error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("{format} decoding failed: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    #[error("error encoding to jpeg: {message}")]
    Encode { message: String },

    #[error("image worker failed: {message}")]
    Worker { message: String },
}

impl ImageError {
    /// Creates decode error for the given format label.
    #[must_use]
    pub fn decode(format: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }

    /// Creates encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates worker error.
    #[must_use]
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Returns whether the failure happened while reading the input.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::UnsupportedFormat | Self::Decode { .. })
    }
}
