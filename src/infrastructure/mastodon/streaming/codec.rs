use serde::Deserialize;
use tracing::trace;

use super::constants::{
    EVENT_DELETE, EVENT_FILTERS_CHANGED, EVENT_NOTIFICATION, EVENT_STATUS_UPDATE, EVENT_UPDATE,
};
use crate::domain::entities::{Notification, Status, StatusId};
use crate::domain::errors::{StreamingError, StreamingResult};
use crate::domain::ports::StreamEvent;
use crate::infrastructure::mastodon::dto::{NotificationResponse, StatusResponse};

/// Envelope of every streaming frame.
#[derive(Debug, Deserialize)]
pub struct StreamMessage {
    #[serde(default)]
    pub stream: Vec<String>,
    pub event: String,
    /// JSON encoded as a string, or a bare id for `delete`.
    #[serde(default)]
    pub payload: Option<String>,
}

pub struct EventParser;

impl EventParser {
    pub fn parse_message(json: &str) -> StreamingResult<StreamMessage> {
        serde_json::from_str(json).map_err(|e| StreamingError::serialization(e.to_string()))
    }

    pub fn parse_frame(json: &str) -> StreamingResult<StreamEvent> {
        let message = Self::parse_message(json)?;
        trace!(stream = ?message.stream, event = %message.event, "Stream frame received");
        Self::parse_event(&message.event, message.payload)
    }

    pub fn parse_event(event: &str, payload: Option<String>) -> StreamingResult<StreamEvent> {
        match event {
            EVENT_NOTIFICATION => Self::parse_notification(&Self::require(event, payload)?),
            EVENT_UPDATE => Self::parse_status(&Self::require(event, payload)?).map(StreamEvent::Update),
            EVENT_STATUS_UPDATE => {
                Self::parse_status(&Self::require(event, payload)?).map(StreamEvent::StatusUpdated)
            }
            EVENT_DELETE => {
                let id = Self::require(event, payload)?;
                Ok(StreamEvent::Deleted {
                    status_id: StatusId::new(id.trim()),
                })
            }
            EVENT_FILTERS_CHANGED => Ok(StreamEvent::FiltersChanged),
            _ => Ok(StreamEvent::Unknown {
                event: event.to_string(),
            }),
        }
    }

    fn require(event: &str, payload: Option<String>) -> StreamingResult<String> {
        payload
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| StreamingError::protocol(format!("missing payload for `{event}`")))
    }

    fn parse_notification(payload: &str) -> StreamingResult<StreamEvent> {
        let notification: NotificationResponse = serde_json::from_str(payload).map_err(|e| {
            StreamingError::serialization(format!("Failed to parse notification: {e}"))
        })?;
        Ok(StreamEvent::Notification(Notification::from(notification)))
    }

    fn parse_status(payload: &str) -> StreamingResult<Status> {
        let status: StatusResponse = serde_json::from_str(payload)
            .map_err(|e| StreamingError::serialization(format!("Failed to parse status: {e}")))?;
        Ok(status.into())
    }
}
