//! Mastodon REST API port.

use async_trait::async_trait;

use crate::domain::entities::{
    Account, CompressedImage, MediaId, Status, StatusId, Visibility,
};
use crate::domain::errors::ApiError;

/// Parameters of a status to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostStatusRequest {
    pub text: String,
    pub in_reply_to_id: Option<StatusId>,
    pub media_ids: Vec<MediaId>,
    pub visibility: Visibility,
}

impl PostStatusRequest {
    #[must_use]
    pub fn new(text: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            text: text.into(),
            in_reply_to_id: None,
            media_ids: Vec::new(),
            visibility,
        }
    }

    #[must_use]
    pub fn in_reply_to(mut self, status_id: StatusId) -> Self {
        self.in_reply_to_id = Some(status_id);
        self
    }

    #[must_use]
    pub fn with_media(mut self, media_ids: Vec<MediaId>) -> Self {
        self.media_ids = media_ids;
        self
    }
}

/// Port for the Mastodon REST operations the bot needs.
#[async_trait]
pub trait MastodonPort: Send + Sync {
    /// Fetches a status by id.
    async fn fetch_status(&self, id: &StatusId) -> Result<Status, ApiError>;

    /// Uploads a JPEG and returns its media id.
    async fn upload_media(&self, image: &CompressedImage) -> Result<MediaId, ApiError>;

    /// Publishes a status.
    async fn post_status(&self, request: &PostStatusRequest) -> Result<Status, ApiError>;

    /// Returns the account owning the access token.
    async fn verify_credentials(&self) -> Result<Account, ApiError>;
}
