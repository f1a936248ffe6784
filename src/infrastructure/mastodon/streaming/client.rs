use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::{Notify, mpsc};
use tracing::{debug, info, trace, warn};

use super::connection::WebSocketConnection;
use super::constants::{STREAMING_PATH, USER_STREAM};
use crate::domain::entities::AccessToken;
use crate::domain::errors::{StreamingError, StreamingResult};
use crate::domain::ports::{StreamEvent, StreamingPort};

/// Builds the user stream URL.
///
/// `streaming_url` wins over the server URL when set. HTTP schemes are
/// mapped to their WebSocket counterparts and the streaming path is
/// appended unless already present.
///
/// # Errors
///
/// Returns `StreamingError::InvalidUrl` for unparsable URLs or unsupported
/// schemes.
pub fn user_stream_url(server_url: &str, streaming_url: Option<&str>) -> StreamingResult<String> {
    let base = streaming_url.unwrap_or(server_url).trim();
    let mut url = Url::parse(base).map_err(|e| StreamingError::invalid_url(e.to_string()))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(StreamingError::invalid_url(format!(
                "unsupported scheme `{other}`"
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| StreamingError::invalid_url(format!("cannot use scheme `{scheme}`")))?;

    let mut path = url.path().trim_end_matches('/').to_string();
    if !path.ends_with(STREAMING_PATH) {
        path.push_str(STREAMING_PATH);
    }
    url.set_path(&path);
    url.query_pairs_mut().clear().append_pair("stream", USER_STREAM);

    Ok(url.into())
}

/// Client for the authenticated user stream.
pub struct StreamingClient {
    url: String,
    token: AccessToken,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
}

impl StreamingClient {
    /// Creates a client for the given instance.
    ///
    /// # Errors
    ///
    /// Returns `StreamingError::InvalidUrl` if no stream URL can be derived.
    pub fn new(
        server_url: &str,
        streaming_url: Option<&str>,
        token: AccessToken,
    ) -> StreamingResult<Self> {
        Ok(Self {
            url: user_stream_url(server_url, streaming_url)?,
            token,
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StreamingPort for StreamingClient {
    async fn connect(&mut self) -> StreamingResult<mpsc::UnboundedReceiver<StreamEvent>> {
        if self.running.load(Ordering::SeqCst) {
            return Err(StreamingError::AlreadyConnected);
        }

        debug!(url = %self.url, "Connecting to streaming API");
        let mut connection = WebSocketConnection::new();
        connection.connect(&self.url, &self.token).await?;
        info!("Connected to user stream");

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let running = self.running.clone();
        let shutdown = self.shutdown.clone();

        running.store(true, Ordering::SeqCst);

        tokio::spawn(async move {
            run_reader(connection, event_tx, &shutdown).await;
            running.store(false, Ordering::SeqCst);
        });

        Ok(event_rx)
    }

    fn disconnect(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.shutdown.notify_one();
        }
    }

    fn is_connected(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

async fn run_reader(
    mut connection: WebSocketConnection,
    event_tx: mpsc::UnboundedSender<StreamEvent>,
    shutdown: &Notify,
) {
    loop {
        let next = tokio::select! {
            () = shutdown.notified() => {
                debug!("Stream reader stopping on request");
                break;
            }
            next = connection.receive() => next,
        };

        match next {
            Ok(event) => {
                trace!(event = event.name(), "Forwarding stream event");
                if event_tx.send(event).is_err() {
                    debug!("Event receiver dropped");
                    break;
                }
            }
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, "Skipping undecodable stream frame");
            }
            Err(e) => {
                if let Some(code) = e.close_code() {
                    info!(code, reason = %e, "Stream closed by server");
                } else {
                    warn!(error = %e, "Stream connection lost");
                }
                break;
            }
        }
    }

    connection.disconnect().await;
}
