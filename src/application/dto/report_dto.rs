//! Outcome reports returned by the use cases.

use crate::domain::BotState;

/// One image that could not be turned into a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    /// Source URL, absent for failures that precede any image.
    pub url: Option<String>,
    /// Pipeline stage that failed.
    pub stage: &'static str,
    /// Text quoted in the error reply.
    pub message: String,
}

/// What handling a single mention did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionReport {
    /// Image URLs found by the collector.
    pub images_found: usize,
    /// Images answered with a compressed JPEG.
    pub images_replied: usize,
    /// Images (or the whole mention) answered with an error.
    pub failures: Vec<ImageFailure>,
    /// Statuses the server accepted, success and error replies alike.
    pub replies_posted: usize,
}

impl MentionReport {
    /// Returns true when every collected image got a JPEG reply.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.images_found > 0 && self.failures.is_empty()
    }
}

/// Totals for one run of the event loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenSummary {
    /// Events read from the stream.
    pub events_received: usize,
    /// Mentions dispatched to the reply workflow.
    pub mentions_handled: usize,
    /// Replies posted across all mentions.
    pub replies_posted: usize,
    /// State after the loop returned.
    pub final_state: BotState,
}
