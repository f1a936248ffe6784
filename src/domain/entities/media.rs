//! Media attachments and compressed image payloads.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Identifier returned by the media upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(String);

impl MediaId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attachment type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Gifv,
    Video,
    Audio,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A media object linked to a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    id: MediaId,
    kind: AttachmentKind,
    url: Option<String>,
    remote_url: Option<String>,
}

impl MediaAttachment {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: AttachmentKind, url: Option<&str>) -> Self {
        Self {
            id: MediaId::new(id),
            kind,
            url: url.map(String::from),
            remote_url: None,
        }
    }

    /// Sets the origin URL used when the server has not cached the file.
    #[must_use]
    pub fn with_remote_url(mut self, remote_url: Option<String>) -> Self {
        self.remote_url = remote_url;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &MediaId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> AttachmentKind {
        self.kind
    }

    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self.kind, AttachmentKind::Image)
    }

    /// URL to download the file from: the server copy, else the origin.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.remote_url.as_deref().filter(|url| !url.is_empty()))
    }
}

/// JPEG-encoded output of the compressor, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    data: Bytes,
    width: u32,
    height: u32,
}

impl CompressedImage {
    /// File name sent with the upload.
    pub const FILE_NAME: &'static str = "compressed.jpg";
    /// MIME type sent with the upload.
    pub const MIME_TYPE: &'static str = "image/jpeg";

    #[must_use]
    pub fn new(data: impl Into<Bytes>, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
        }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Cheap clone of the encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_url_falls_back_to_remote() {
        let cached = MediaAttachment::new("1", AttachmentKind::Image, Some("https://local/a.png"))
            .with_remote_url(Some("https://origin/a.png".to_string()));
        assert_eq!(cached.source_url(), Some("https://local/a.png"));

        let uncached = MediaAttachment::new("2", AttachmentKind::Image, None)
            .with_remote_url(Some("https://origin/b.png".to_string()));
        assert_eq!(uncached.source_url(), Some("https://origin/b.png"));

        let missing = MediaAttachment::new("3", AttachmentKind::Image, Some(""));
        assert_eq!(missing.source_url(), None);
    }

    #[test]
    fn test_unknown_attachment_kind() {
        let kind: AttachmentKind = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(kind, AttachmentKind::Unknown);

        let kind: AttachmentKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(kind, AttachmentKind::Image);
    }
}
