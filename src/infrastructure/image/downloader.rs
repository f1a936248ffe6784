//! Plain HTTP download of attachment files.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::ApiError;
use crate::domain::ports::ImageFetcherPort;
use crate::infrastructure::mastodon::{build_http_client, map_transport_error};

/// Downloads attachment bytes without credentials.
///
/// Attachment URLs may point at remote instances, so the bot's token is
/// never sent here.
pub struct HttpImageDownloader {
    http_client: Client,
}

impl HttpImageDownloader {
    /// Creates a downloader.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: build_http_client(timeout)?,
        })
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageDownloader {
    async fn fetch(&self, url: &str) -> Result<Bytes, ApiError> {
        debug!(url, "Downloading image");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Image request failed");
            map_transport_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("failed to read body: {e}")))?;

        debug!(url, bytes = bytes.len(), "Image downloaded");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(head: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8 * 1024];
            let request_len = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..request_len]).to_lowercase();
            assert!(!request.contains("authorization"));
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/media/a.png")
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\n",
            b"\x89PNG",
        )
        .await;
        let downloader = HttpImageDownloader::new(Some(Duration::from_secs(5))).unwrap();

        let bytes = tokio_test::assert_ok!(downloader.fetch(&url).await);

        assert_eq!(&bytes[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            b"",
        )
        .await;
        let downloader = HttpImageDownloader::new(None).unwrap();

        let err = downloader.fetch(&url).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[tokio::test]
    async fn test_invalid_url_is_error() {
        let downloader = HttpImageDownloader::new(None).unwrap();
        assert!(downloader.fetch("not a url").await.is_err());
    }
}
