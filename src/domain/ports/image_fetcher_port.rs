//! Plain HTTP download port.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::ApiError;

/// Port for downloading attachment bytes by URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Downloads the full response body.
    async fn fetch(&self, url: &str) -> Result<Bytes, ApiError>;
}
