//! Streaming connection errors.

use thiserror::Error;

pub type StreamingResult<T> = Result<T, StreamingError>;

#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StreamingError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("invalid streaming url: {message}")]
    InvalidUrl { message: String },

    #[error("connection closed with code {code}: {reason}")]
    ConnectionClosed { code: u16, reason: String },

    #[error("websocket error: {message}")]
    WebSocket { message: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("protocol error: {message}")]
    ProtocolError { message: String },

    #[error("not connected to streaming api")]
    NotConnected,

    #[error("already connecting or connected")]
    AlreadyConnected,
}

impl StreamingError {
    #[must_use]
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn websocket(message: impl Into<String>) -> Self {
        Self::WebSocket {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Returns whether the error ends the stream.
    ///
    /// Frame-level problems only cost the offending frame.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::SerializationError { .. } | Self::ProtocolError { .. }
        )
    }

    #[must_use]
    pub const fn close_code(&self) -> Option<u16> {
        if let Self::ConnectionClosed { code, .. } = self {
            Some(*code)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        assert!(StreamingError::connection_failed("refused").is_fatal());
        assert!(StreamingError::websocket("reset").is_fatal());
        assert!(!StreamingError::serialization("bad json").is_fatal());
        assert!(!StreamingError::protocol("missing payload").is_fatal());
    }

    #[test]
    fn test_close_code() {
        let closed = StreamingError::ConnectionClosed {
            code: 1001,
            reason: "going away".to_string(),
        };
        assert_eq!(closed.close_code(), Some(1001));
        assert_eq!(StreamingError::NotConnected.close_code(), None);
    }
}
