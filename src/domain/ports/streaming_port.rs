use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::entities::{Notification, Status, StatusId};
use crate::domain::errors::StreamingError;

/// Event delivered by the user stream.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum StreamEvent {
    Notification(Notification),
    Update(Status),
    StatusUpdated(Status),
    Deleted { status_id: StatusId },
    FiltersChanged,
    Unknown { event: String },
}

impl StreamEvent {
    /// Returns the notification when this event is a mention.
    #[must_use]
    pub const fn mention(&self) -> Option<&Notification> {
        match self {
            Self::Notification(notification) if notification.is_mention() => Some(notification),
            _ => None,
        }
    }

    /// Wire name of the event, for logs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Notification(_) => "notification",
            Self::Update(_) => "update",
            Self::StatusUpdated(_) => "status.update",
            Self::Deleted { .. } => "delete",
            Self::FiltersChanged => "filters_changed",
            Self::Unknown { event } => event.as_str(),
        }
    }
}

#[async_trait]
pub trait StreamingPort: Send + Sync {
    /// Opens the user stream.
    ///
    /// Resolves once the connection is established. Events arrive on the
    /// returned channel in delivery order; the channel closes when the
    /// stream ends.
    ///
    /// # Errors
    ///
    /// Returns `StreamingError` if the connection cannot be established.
    async fn connect(&mut self) -> Result<mpsc::UnboundedReceiver<StreamEvent>, StreamingError>;

    fn disconnect(&self);

    fn is_connected(&self) -> bool;
}
