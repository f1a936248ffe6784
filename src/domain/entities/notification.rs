//! Notification entity.

use serde::{Deserialize, Serialize};

use super::{Account, Status};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum NotificationKind {
    Mention,
    Status,
    Reblog,
    Follow,
    FollowRequest,
    Favourite,
    Poll,
    Update,
    #[default]
    #[serde(other)]
    Other,
}

/// A notification addressed to the bot's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: NotificationId,
    kind: NotificationKind,
    account: Account,
    status: Option<Status>,
}

impl Notification {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: NotificationKind,
        account: Account,
        status: Option<Status>,
    ) -> Self {
        Self {
            id: NotificationId::new(id),
            kind,
            account,
            status,
        }
    }

    /// Creates a mention notification for the given status.
    #[must_use]
    pub fn mention(id: impl Into<String>, account: Account, status: Status) -> Self {
        Self::new(id, NotificationKind::Mention, account, Some(status))
    }

    #[must_use]
    pub const fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Account that triggered the notification.
    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    #[must_use]
    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    #[must_use]
    pub const fn is_mention(&self) -> bool {
        matches!(self.kind, NotificationKind::Mention)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("\"mention\"", NotificationKind::Mention ; "mention")]
    #[test_case("\"follow_request\"", NotificationKind::FollowRequest ; "follow_request")]
    #[test_case("\"admin.sign_up\"", NotificationKind::Other ; "unknown")]
    fn test_kind_wire_names(json: &str, expected: NotificationKind) {
        let kind: NotificationKind = serde_json::from_str(json).unwrap();
        assert_eq!(kind, expected);
    }
}
