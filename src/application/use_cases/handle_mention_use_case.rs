//! Reply workflow for a single mention.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::application::dto::{ImageFailure, MentionReport};
use crate::application::services::{AttachmentCollector, ImageCompressor, ImageDecoder};
use crate::domain::entities::{CompressedImage, Notification, Status};
use crate::domain::errors::{ImageError, ProcessingError};
use crate::domain::ports::{ImageFetcherPort, MastodonPort, PostStatusRequest};

/// Text following the mention in a successful reply.
pub const SUCCESS_REPLY_TEXT: &str = "Here's your compressed JPEG!";

/// Text between the mention and the error message in an error reply.
pub const ERROR_REPLY_PREFIX: &str = "Oops!";

/// Turns a mention into one reply per image found.
#[derive(Clone)]
pub struct HandleMentionUseCase {
    mastodon: Arc<dyn MastodonPort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    collector: AttachmentCollector,
}

impl HandleMentionUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(mastodon: Arc<dyn MastodonPort>, fetcher: Arc<dyn ImageFetcherPort>) -> Self {
        let collector = AttachmentCollector::new(mastodon.clone());
        Self {
            mastodon,
            fetcher,
            collector,
        }
    }

    /// Handles a mention notification.
    ///
    /// Images are processed one after another. A failure on one image is
    /// answered with an error reply and does not stop the rest.
    pub async fn execute(&self, notification: &Notification) -> MentionReport {
        let mut report = MentionReport::default();

        let Some(status) = notification.status() else {
            warn!(notification_id = %notification.id(), "Mention without a status, skipping");
            return report;
        };

        info!(
            status_id = %status.id(),
            from = %notification.account(),
            "Handling mention"
        );

        let images = self.collector.collect(status).await;
        report.images_found = images.len();

        if images.is_empty() {
            let failure = ProcessingError::NoImagesFound;
            report.failures.push(ImageFailure {
                url: None,
                stage: failure.stage(),
                message: failure.to_string(),
            });
            self.reply_with_error(notification, status, &failure, &mut report)
                .await;
            return report;
        }

        for url in &images {
            match self.process_image(notification, status, url).await {
                Ok(()) => {
                    report.images_replied += 1;
                    report.replies_posted += 1;
                }
                Err(e) => {
                    warn!(url = %url, stage = e.stage(), error = %e, "Image processing failed");
                    report.failures.push(ImageFailure {
                        url: Some(url.clone()),
                        stage: e.stage(),
                        message: e.to_string(),
                    });
                    self.reply_with_error(notification, status, &e, &mut report)
                        .await;
                }
            }
        }

        debug!(
            status_id = %status.id(),
            found = report.images_found,
            replied = report.images_replied,
            failed = report.failures.len(),
            "Mention handled"
        );

        report
    }

    async fn process_image(
        &self,
        notification: &Notification,
        status: &Status,
        url: &str,
    ) -> Result<(), ProcessingError> {
        let data = self
            .fetcher
            .fetch(url)
            .await
            .map_err(ProcessingError::Fetch)?;

        let compressed = transcode(data).await?;

        let media_id = self
            .mastodon
            .upload_media(&compressed)
            .await
            .map_err(ProcessingError::Upload)?;

        let request = PostStatusRequest::new(
            format!("{} {SUCCESS_REPLY_TEXT}", notification.account().mention()),
            status.visibility().for_reply(),
        )
        .in_reply_to(status.id().clone())
        .with_media(vec![media_id]);

        let reply = self
            .mastodon
            .post_status(&request)
            .await
            .map_err(ProcessingError::Post)?;

        info!(reply_id = %reply.id(), bytes = compressed.len(), "Posted compressed JPEG");
        Ok(())
    }

    async fn reply_with_error(
        &self,
        notification: &Notification,
        status: &Status,
        failure: &ProcessingError,
        report: &mut MentionReport,
    ) {
        let request = PostStatusRequest::new(
            format!(
                "{} {ERROR_REPLY_PREFIX} {failure}",
                notification.account().mention()
            ),
            status.visibility(),
        )
        .in_reply_to(status.id().clone());

        match self.mastodon.post_status(&request).await {
            Ok(_) => report.replies_posted += 1,
            Err(e) => error!(status_id = %status.id(), error = %e, "Error posting error reply"),
        }
    }
}

/// Decodes and recompresses off the async runtime.
async fn transcode(data: Bytes) -> Result<CompressedImage, ImageError> {
    tokio::task::spawn_blocking(move || {
        let decoded = ImageDecoder::decode(&data)?;
        info!(format = decoded.format_label(), "Decoded image");
        ImageCompressor::compress(decoded.image())
    })
    .await
    .map_err(|e| ImageError::worker(e.to_string()))?
}
