//! Event loop over the user stream.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::application::dto::ListenSummary;
use crate::domain::BotState;
use crate::domain::ports::StreamEvent;

use super::HandleMentionUseCase;

/// Consumes stream events one at a time and dispatches mentions.
#[derive(Clone)]
pub struct ListenUseCase {
    handler: HandleMentionUseCase,
    state: Arc<Mutex<BotState>>,
}

impl ListenUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(handler: HandleMentionUseCase) -> Self {
        Self {
            handler,
            state: Arc::new(Mutex::new(BotState::Listening)),
        }
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> BotState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: BotState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Runs until the event channel closes.
    ///
    /// Each mention is handled to completion before the next event is read.
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<StreamEvent>) -> ListenSummary {
        self.set_state(BotState::Listening);
        let mut summary = ListenSummary::default();

        while let Some(event) = events.recv().await {
            summary.events_received += 1;

            let Some(notification) = event.mention() else {
                trace!(event = event.name(), "Ignoring stream event");
                continue;
            };

            debug!(notification_id = %notification.id(), "Dispatching mention");
            let report = self.handler.execute(notification).await;
            summary.mentions_handled += 1;
            summary.replies_posted += report.replies_posted;
        }

        self.set_state(BotState::Terminated);
        summary.final_state = BotState::Terminated;

        info!(
            events = summary.events_received,
            mentions = summary.mentions_handled,
            replies = summary.replies_posted,
            "Stream closed, event loop terminated"
        );

        summary
    }
}
