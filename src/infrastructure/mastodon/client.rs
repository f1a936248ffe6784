//! Mastodon REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{AccountResponse, ErrorResponse, MediaResponse, PostStatusBody, StatusResponse};
use crate::domain::entities::{AccessToken, Account, CompressedImage, MediaId, Status, StatusId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{MastodonPort, PostStatusRequest};

const USER_AGENT: &str = concat!("jpeg-bot/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Maps a transport failure from `reqwest` into an [`ApiError`].
pub(crate) fn map_transport_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network(format!("failed to connect: {e}"))
    } else {
        ApiError::network(e.to_string())
    }
}

/// Builds the shared `reqwest` client.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<Client, ApiError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))
}

/// Authenticated client for one Mastodon instance.
pub struct MastodonClient {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl MastodonClient {
    /// Creates a client for the instance at `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        token: AccessToken,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let base_url: String = base_url.into();
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .header(header::AUTHORIZATION, self.token.bearer())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Mastodon API");
                map_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(handle_error_response(status, response).await);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Mastodon response");
            ApiError::parse(e.to_string())
        })
    }
}

async fn handle_error_response(status: StatusCode, response: Response) -> ApiError {
    let retry_after_ms = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000));

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            retry_after_ms: retry_after_ms.unwrap_or(DEFAULT_RETRY_AFTER_MS),
        },
        _ => {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            };
            ApiError::http(status.as_u16(), message)
        }
    }
}

#[async_trait]
impl MastodonPort for MastodonClient {
    async fn fetch_status(&self, id: &StatusId) -> Result<Status, ApiError> {
        debug!(status_id = %id, "Fetching status");

        let request = self.client.get(self.url(&format!("/api/v1/statuses/{id}")));
        let status: StatusResponse = self.send_json(request).await?;

        Ok(status.into())
    }

    async fn upload_media(&self, image: &CompressedImage) -> Result<MediaId, ApiError> {
        debug!(bytes = image.len(), "Uploading media");

        let part = multipart::Part::stream_with_length(image.bytes(), image.len() as u64)
            .file_name(CompressedImage::FILE_NAME)
            .mime_str(CompressedImage::MIME_TYPE)
            .map_err(|e| ApiError::unexpected(format!("invalid media part: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let request = self.client.post(self.url("/api/v1/media")).multipart(form);
        let media: MediaResponse = self.send_json(request).await?;

        debug!(media_id = %media.id, "Media uploaded");
        Ok(media.into())
    }

    async fn post_status(&self, request: &PostStatusRequest) -> Result<Status, ApiError> {
        debug!(
            in_reply_to = ?request.in_reply_to_id,
            media = request.media_ids.len(),
            visibility = %request.visibility,
            "Posting status"
        );

        let builder = self
            .client
            .post(self.url("/api/v1/statuses"))
            .json(&PostStatusBody::from(request));
        let status: StatusResponse = self.send_json(builder).await?;

        Ok(status.into())
    }

    async fn verify_credentials(&self) -> Result<Account, ApiError> {
        let request = self
            .client
            .get(self.url("/api/v1/accounts/verify_credentials"));
        let account: AccountResponse = self.send_json(request).await?;

        debug!(
            account_id = %account.id,
            acct = %account.acct,
            "Credentials verified"
        );

        Ok(account.into())
    }
}
