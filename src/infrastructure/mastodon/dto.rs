//! Wire shapes of the Mastodon REST and streaming APIs.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Account, AttachmentKind, MediaAttachment, MediaId, Notification, NotificationKind,
    ReplyTarget, Status, Visibility,
};
use crate::domain::ports::PostStatusRequest;
use crate::domain::serde_utils;

/// Mastodon account.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub acct: String,
}

impl From<AccountResponse> for Account {
    fn from(account: AccountResponse) -> Self {
        Self::new(account.id, account.username, account.acct)
    }
}

/// Mastodon media attachment.
#[derive(Debug, Deserialize)]
pub struct MediaAttachmentResponse {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl From<MediaAttachmentResponse> for MediaAttachment {
    fn from(media: MediaAttachmentResponse) -> Self {
        Self::new(media.id, media.kind, media.url.as_deref()).with_remote_url(media.remote_url)
    }
}

/// Mastodon status.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub id: String,
    pub account: AccountResponse,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub media_attachments: Vec<MediaAttachmentResponse>,
    #[serde(default, deserialize_with = "serde_utils::reply_target::deserialize")]
    pub in_reply_to_id: ReplyTarget,
}

impl From<StatusResponse> for Status {
    fn from(status: StatusResponse) -> Self {
        Self::new(status.id, status.account.into(), status.visibility)
            .with_attachments(
                status
                    .media_attachments
                    .into_iter()
                    .map(MediaAttachment::from)
                    .collect(),
            )
            .with_reply_target(status.in_reply_to_id)
    }
}

/// Mastodon notification.
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub account: AccountResponse,
    #[serde(default)]
    pub status: Option<StatusResponse>,
}

impl From<NotificationResponse> for Notification {
    fn from(notification: NotificationResponse) -> Self {
        Self::new(
            notification.id,
            notification.kind,
            notification.account.into(),
            notification.status.map(Status::from),
        )
    }
}

/// Response of the media upload endpoint.
#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    pub id: String,
}

impl From<MediaResponse> for MediaId {
    fn from(media: MediaResponse) -> Self {
        Self::new(media.id)
    }
}

/// Mastodon API error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human readable error from the server.
    pub error: String,
}

/// Body of `POST /api/v1/statuses`.
#[derive(Debug, Serialize)]
pub struct PostStatusBody<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_ids: Vec<&'a str>,
    pub visibility: Visibility,
}

impl<'a> From<&'a PostStatusRequest> for PostStatusBody<'a> {
    fn from(request: &'a PostStatusRequest) -> Self {
        Self {
            status: &request.text,
            in_reply_to_id: request.in_reply_to_id.as_ref().map(|id| id.as_str()),
            media_ids: request.media_ids.iter().map(MediaId::as_str).collect(),
            visibility: request.visibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StatusId;

    const STATUS_JSON: &str = r#"{
        "id": "109",
        "visibility": "private",
        "in_reply_to_id": "100",
        "account": {"id": "1", "username": "alice", "acct": "alice@remote.example"},
        "media_attachments": [
            {"id": "m1", "type": "image", "url": "https://files.example/a.png"},
            {"id": "m2", "type": "video", "url": "https://files.example/b.mp4"},
            {"id": "m3", "type": "image", "url": null, "remote_url": "https://remote.example/c.png"},
            {"id": "m4", "type": "hologram", "url": "https://files.example/d.bin"}
        ],
        "content": "<p>ignored</p>"
    }"#;

    #[test]
    fn test_status_conversion() {
        let response: StatusResponse = serde_json::from_str(STATUS_JSON).unwrap();
        let status = Status::from(response);

        assert_eq!(status.id(), &StatusId::new("109"));
        assert_eq!(status.visibility(), Visibility::Private);
        assert_eq!(status.account().acct(), "alice@remote.example");
        assert_eq!(status.in_reply_to().resolve(), Some(StatusId::new("100")));
        assert_eq!(status.media_attachments().len(), 4);
        assert_eq!(
            status.media_attachments()[3].kind(),
            AttachmentKind::Unknown
        );
        assert_eq!(
            status.image_urls(),
            vec![
                "https://files.example/a.png".to_string(),
                "https://remote.example/c.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_integer_reply_id() {
        let json = r#"{
            "id": "5",
            "visibility": "public",
            "in_reply_to_id": 4,
            "account": {"id": "1", "username": "a", "acct": "a"}
        }"#;
        let status = Status::from(serde_json::from_str::<StatusResponse>(json).unwrap());

        assert_eq!(status.in_reply_to(), &ReplyTarget::Typed(StatusId::new("4")));
        assert!(status.media_attachments().is_empty());
    }

    #[test]
    fn test_notification_conversion() {
        let json = r#"{
            "id": "n1",
            "type": "admin.sign_up",
            "account": {"id": "2", "username": "bob", "acct": "bob"}
        }"#;
        let notification =
            Notification::from(serde_json::from_str::<NotificationResponse>(json).unwrap());

        assert_eq!(notification.kind(), NotificationKind::Other);
        assert!(notification.status().is_none());
        assert!(!notification.is_mention());
    }

    #[test]
    fn test_post_body_shape() {
        let request = PostStatusRequest::new("@alice hi", Visibility::Unlisted)
            .in_reply_to(StatusId::new("9"))
            .with_media(vec![MediaId::new("77")]);
        let body = serde_json::to_value(PostStatusBody::from(&request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "status": "@alice hi",
                "in_reply_to_id": "9",
                "media_ids": ["77"],
                "visibility": "unlisted"
            })
        );
    }

    #[test]
    fn test_post_body_omits_empty_fields() {
        let request = PostStatusRequest::new("@alice oops", Visibility::Direct);
        let body = serde_json::to_value(PostStatusBody::from(&request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"status": "@alice oops", "visibility": "direct"})
        );
    }
}
