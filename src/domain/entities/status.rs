//! Mastodon status entity and its reply-target normalization.

use serde::{Deserialize, Serialize};

use super::{Account, MediaAttachment};

/// Unique identifier for a Mastodon status.
///
/// Mastodon serializes ids as strings even when they are numeric, so the id
/// is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(String);

impl StatusId {
    /// Creates a status id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StatusId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for StatusId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Audience scope of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone, shown in public timelines.
    #[default]
    Public,
    /// Visible to everyone, hidden from public timelines.
    Unlisted,
    /// Followers only.
    Private,
    /// Mentioned accounts only.
    Direct,
}

impl Visibility {
    /// Visibility used for a successful reply.
    ///
    /// Public sources are answered unlisted so the bot never floods public
    /// timelines; every other scope is preserved.
    #[must_use]
    pub const fn for_reply(self) -> Self {
        match self {
            Self::Public => Self::Unlisted,
            other => other,
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
            Self::Direct => "direct",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parent a status replies to, as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyTarget {
    /// Not a reply.
    #[default]
    Absent,
    /// Id delivered as a JSON string.
    Raw(String),
    /// Id delivered as a JSON integer.
    Typed(StatusId),
    /// Any other JSON shape.
    Unrecognized {
        /// Short description of what was received.
        description: String,
    },
}

impl ReplyTarget {
    /// Resolves the target into a status id.
    ///
    /// Blank raw ids, absent targets and unrecognized shapes resolve to
    /// `None`.
    #[must_use]
    pub fn resolve(&self) -> Option<StatusId> {
        match self {
            Self::Raw(raw) => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| StatusId::new(trimmed))
            }
            Self::Typed(id) => Some(id.clone()),
            Self::Absent | Self::Unrecognized { .. } => None,
        }
    }

    /// Returns true when the wire value had an unexpected shape.
    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized { .. })
    }
}

/// A Mastodon status (post).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    id: StatusId,
    account: Account,
    visibility: Visibility,
    media_attachments: Vec<MediaAttachment>,
    in_reply_to: ReplyTarget,
}

impl Status {
    /// Creates a status with no attachments that is not a reply.
    #[must_use]
    pub fn new(id: impl Into<String>, account: Account, visibility: Visibility) -> Self {
        Self {
            id: StatusId::new(id),
            account,
            visibility,
            media_attachments: Vec::new(),
            in_reply_to: ReplyTarget::Absent,
        }
    }

    /// Sets the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<MediaAttachment>) -> Self {
        self.media_attachments = attachments;
        self
    }

    /// Sets the reply target.
    #[must_use]
    pub fn with_reply_target(mut self, target: ReplyTarget) -> Self {
        self.in_reply_to = target;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &StatusId {
        &self.id
    }

    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn media_attachments(&self) -> &[MediaAttachment] {
        &self.media_attachments
    }

    #[must_use]
    pub const fn in_reply_to(&self) -> &ReplyTarget {
        &self.in_reply_to
    }

    /// Source URLs of the image attachments, in attachment order.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        self.media_attachments
            .iter()
            .filter(|attachment| attachment.is_image())
            .filter_map(|attachment| attachment.source_url().map(String::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AttachmentKind;
    use test_case::test_case;

    #[test_case(Visibility::Public, Visibility::Unlisted ; "public_downgrades")]
    #[test_case(Visibility::Unlisted, Visibility::Unlisted ; "unlisted_kept")]
    #[test_case(Visibility::Private, Visibility::Private ; "private_kept")]
    #[test_case(Visibility::Direct, Visibility::Direct ; "direct_kept")]
    fn test_reply_visibility(source: Visibility, expected: Visibility) {
        assert_eq!(source.for_reply(), expected);
    }

    #[test_case(ReplyTarget::Absent, None ; "absent")]
    #[test_case(ReplyTarget::Raw("109".to_string()), Some(StatusId::new("109")) ; "raw")]
    #[test_case(ReplyTarget::Raw("   ".to_string()), None ; "blank_raw")]
    #[test_case(ReplyTarget::Typed(StatusId::from(42)), Some(StatusId::new("42")) ; "typed")]
    #[test_case(ReplyTarget::Unrecognized { description: "boolean".to_string() }, None ; "unrecognized")]
    fn test_reply_target_resolution(target: ReplyTarget, expected: Option<StatusId>) {
        assert_eq!(target.resolve(), expected);
    }

    #[test]
    fn test_image_urls_keep_order_and_skip_other_kinds() {
        let status = Status::new("1", Account::new("7", "alice", "alice"), Visibility::Public)
            .with_attachments(vec![
                MediaAttachment::new("a", AttachmentKind::Image, Some("https://x/a.png")),
                MediaAttachment::new("b", AttachmentKind::Video, Some("https://x/b.mp4")),
                MediaAttachment::new("c", AttachmentKind::Image, Some("https://x/c.jpg")),
            ]);

        assert_eq!(
            status.image_urls(),
            vec!["https://x/a.png".to_string(), "https://x/c.jpg".to_string()]
        );
    }

    #[test]
    fn test_visibility_wire_names() {
        let json = serde_json::to_string(&Visibility::Unlisted).unwrap();
        assert_eq!(json, "\"unlisted\"");

        let parsed: Visibility = serde_json::from_str("\"direct\"").unwrap();
        assert_eq!(parsed, Visibility::Direct);
    }
}
