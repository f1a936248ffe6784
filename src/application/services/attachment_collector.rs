//! Finds the images a mention asks the bot to compress.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{ReplyTarget, Status};
use crate::domain::ports::MastodonPort;

/// Collects image URLs from a mention or, failing that, from its parent.
#[derive(Clone)]
pub struct AttachmentCollector {
    mastodon: Arc<dyn MastodonPort>,
}

impl AttachmentCollector {
    #[must_use]
    pub fn new(mastodon: Arc<dyn MastodonPort>) -> Self {
        Self { mastodon }
    }

    /// Returns image URLs in attachment order.
    ///
    /// The parent status is only consulted when the mention itself has no
    /// images. A failed parent lookup yields an empty list.
    pub async fn collect(&self, status: &Status) -> Vec<String> {
        let images = status.image_urls();
        if !images.is_empty() {
            return images;
        }

        let parent_id = match status.in_reply_to() {
            ReplyTarget::Unrecognized { description } => {
                warn!(
                    status_id = %status.id(),
                    received = %description,
                    "Unexpected type for in_reply_to_id"
                );
                return images;
            }
            target => match target.resolve() {
                Some(id) => id,
                None => return images,
            },
        };

        debug!(status_id = %status.id(), parent_id = %parent_id, "Looking for images in parent status");

        match self.mastodon.fetch_status(&parent_id).await {
            Ok(parent) => parent.image_urls(),
            Err(e) => {
                warn!(parent_id = %parent_id, error = %e, "Failed to fetch parent status");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Account, AttachmentKind, MediaAttachment, StatusId, Visibility};
    use crate::domain::ports::mocks::MockMastodon;

    fn author() -> Account {
        Account::new("1", "alice", "alice@example.social")
    }

    fn image(id: &str, url: &str) -> MediaAttachment {
        MediaAttachment::new(id, AttachmentKind::Image, Some(url))
    }

    fn parent_with_images() -> Status {
        Status::new("100", author(), Visibility::Public).with_attachments(vec![
            image("p1", "https://files.example/p1.png"),
            image("p2", "https://files.example/p2.webp"),
        ])
    }

    #[tokio::test]
    async fn test_own_images_skip_parent_lookup() {
        let mastodon = Arc::new(MockMastodon::new().with_status(parent_with_images()));
        let collector = AttachmentCollector::new(mastodon.clone());

        let status = Status::new("200", author(), Visibility::Public)
            .with_attachments(vec![
                image("a", "https://files.example/a.jpg"),
                MediaAttachment::new("v", AttachmentKind::Gifv, Some("https://files.example/v.mp4")),
                image("b", "https://files.example/b.png"),
            ])
            .with_reply_target(ReplyTarget::Raw("100".to_string()));

        let urls = collector.collect(&status).await;

        assert_eq!(
            urls,
            vec![
                "https://files.example/a.jpg".to_string(),
                "https://files.example/b.png".to_string()
            ]
        );
        assert!(mastodon.fetched().await.is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_to_parent_images() {
        let mastodon = Arc::new(MockMastodon::new().with_status(parent_with_images()));
        let collector = AttachmentCollector::new(mastodon.clone());

        let status = Status::new("200", author(), Visibility::Unlisted)
            .with_reply_target(ReplyTarget::Raw("100".to_string()));

        let urls = collector.collect(&status).await;

        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://files.example/p1.png");
        assert_eq!(mastodon.fetched().await, vec![StatusId::new("100")]);
    }

    #[tokio::test]
    async fn test_typed_reply_target_is_resolved() {
        let mastodon = Arc::new(MockMastodon::new().with_status(parent_with_images()));
        let collector = AttachmentCollector::new(mastodon.clone());

        let status = Status::new("200", author(), Visibility::Public)
            .with_reply_target(ReplyTarget::Typed(StatusId::from(100)));

        assert_eq!(collector.collect(&status).await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_parent_lookup_is_absorbed() {
        let mastodon = Arc::new(MockMastodon::new());
        let collector = AttachmentCollector::new(mastodon.clone());

        let status = Status::new("200", author(), Visibility::Public)
            .with_reply_target(ReplyTarget::Raw("404".to_string()));

        assert!(collector.collect(&status).await.is_empty());
        assert_eq!(mastodon.fetched().await.len(), 1);
    }

    #[tokio::test]
    async fn test_parent_without_images() {
        let bare_parent = Status::new("100", author(), Visibility::Public);
        let mastodon = Arc::new(MockMastodon::new().with_status(bare_parent));
        let collector = AttachmentCollector::new(mastodon);

        let status = Status::new("200", author(), Visibility::Public)
            .with_reply_target(ReplyTarget::Raw("100".to_string()));

        assert!(collector.collect(&status).await.is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_and_absent_targets_skip_lookup() {
        let mastodon = Arc::new(MockMastodon::new().with_status(parent_with_images()));
        let collector = AttachmentCollector::new(mastodon.clone());

        let unrecognized = Status::new("200", author(), Visibility::Public).with_reply_target(
            ReplyTarget::Unrecognized {
                description: "boolean true".to_string(),
            },
        );
        let absent = Status::new("201", author(), Visibility::Public);
        let blank = Status::new("202", author(), Visibility::Public)
            .with_reply_target(ReplyTarget::Raw(String::new()));

        assert!(collector.collect(&unrecognized).await.is_empty());
        assert!(collector.collect(&absent).await.is_empty());
        assert!(collector.collect(&blank).await.is_empty());
        assert!(mastodon.fetched().await.is_empty());
    }
}
