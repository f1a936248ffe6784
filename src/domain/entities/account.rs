//! Mastodon account entity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Mastodon account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: String,
    acct: String,
}

impl Account {
    /// Creates an account.
    ///
    /// `acct` is `username` for local accounts and `username@domain` for
    /// remote ones.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        acct: impl Into<String>,
    ) -> Self {
        Self {
            id: AccountId::new(id),
            username: username.into(),
            acct: acct.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &AccountId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn acct(&self) -> &str {
        &self.acct
    }

    /// Returns the `@acct` form used to address this account in a status.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("@{}", self.acct)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.acct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_uses_full_acct() {
        let remote = Account::new("1", "bob", "bob@example.social");
        assert_eq!(remote.mention(), "@bob@example.social");

        let local = Account::new("2", "carol", "carol");
        assert_eq!(local.to_string(), "@carol");
    }
}
