use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};

use super::codec::EventParser;
use super::constants::CONNECTION_TIMEOUT;
use crate::domain::entities::AccessToken;
use crate::domain::errors::{StreamingError, StreamingResult};
use crate::domain::ports::StreamEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, WsMessage>;
type WsReader = SplitStream<WsStream>;

/// One authenticated WebSocket to the streaming API.
pub struct WebSocketConnection {
    writer: Option<WsWriter>,
    reader: Option<WsReader>,
}

impl WebSocketConnection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            writer: None,
            reader: None,
        }
    }

    pub async fn connect(&mut self, url: &str, token: &AccessToken) -> StreamingResult<()> {
        let mut request = url
            .into_client_request()
            .map_err(|e| StreamingError::invalid_url(e.to_string()))?;
        let bearer = HeaderValue::from_str(&token.bearer())
            .map_err(|e| StreamingError::connection_failed(format!("invalid token header: {e}")))?;
        request.headers_mut().insert(header::AUTHORIZATION, bearer);

        let (ws_stream, response) = timeout(CONNECTION_TIMEOUT, connect_async(request))
            .await
            .map_err(|_| StreamingError::connection_failed("connection timed out"))?
            .map_err(|e| StreamingError::connection_failed(e.to_string()))?;

        debug!(status = %response.status(), "WebSocket handshake complete");

        let (writer, reader) = ws_stream.split();
        self.writer = Some(writer);
        self.reader = Some(reader);

        Ok(())
    }

    pub async fn disconnect(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.close().await;
        }
        self.reader = None;
        debug!("WebSocket connection closed");
    }

    /// Reads frames until one decodes into an event or the socket ends.
    ///
    /// Decoding failures are returned as non-fatal errors so the caller can
    /// skip the frame and keep reading. Once the socket has closed or failed
    /// the reader is released and later calls return `NotConnected`.
    pub async fn receive(&mut self) -> StreamingResult<StreamEvent> {
        let reader = self.reader.as_mut().ok_or(StreamingError::NotConnected)?;

        loop {
            match reader.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return EventParser::parse_frame(text.as_str());
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    let text = std::str::from_utf8(&data)
                        .map_err(|e| StreamingError::serialization(e.to_string()))?;
                    return EventParser::parse_frame(text);
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    self.reader = None;
                    let (code, reason) = frame.map_or_else(
                        || (1000, "Normal closure".to_string()),
                        |f| (f.code.into(), f.reason.to_string()),
                    );

                    return Err(StreamingError::ConnectionClosed { code, reason });
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    trace!("Answering ping");
                    if let Some(writer) = self.writer.as_mut() {
                        let _ = writer.send(WsMessage::Pong(data)).await;
                    }
                }
                Some(Ok(WsMessage::Pong(_) | WsMessage::Frame(_))) => {}
                Some(Err(e)) => {
                    self.reader = None;
                    return Err(StreamingError::websocket(e.to_string()));
                }
                None => {
                    self.reader = None;
                    return Err(StreamingError::ConnectionClosed {
                        code: 1000,
                        reason: "Stream ended".to_string(),
                    });
                }
            }
        }
    }

}

impl Default for WebSocketConnection {
    fn default() -> Self {
        Self::new()
    }
}
