//! The `Account` entity and its declarative builder.

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::tags::Tags;

/// A single classification node in a chart's hierarchy.
///
/// An empty `id` marks an unsaved account. `number`, `parent` and `created`
/// are immutable once the account has been persisted; the repository pins
/// them to their stored values on update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub number: String,
    pub name: String,
    pub tags: Tags,
    /// Id of the parent account within the same chart; empty for roots.
    pub parent: String,
    pub user: String,
    #[serde(rename = "timestamp")]
    pub as_of: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
}

impl Account {
    /// Starts declarative creation of an `Account`.
    pub fn builder() -> AccountBuilder {
        AccountBuilder::new()
    }

    /// Whether this account has not yet been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.name)
    }
}

/// Helper to declaratively define an `Account`.
#[derive(Clone)]
pub struct AccountBuilder {
    account: Account,
}

impl AccountBuilder {
    fn new() -> Self {
        AccountBuilder {
            account: Account::default(),
        }
    }

    /// Builds the final `Account`.
    pub fn build(self) -> Account {
        self.account
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.account.id = id.into();
        self
    }

    pub fn with_number<S: Into<String>>(mut self, number: S) -> Self {
        self.account.number = number.into();
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.account.name = name.into();
        self
    }

    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.account.tags.push(tag);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.account.tags = tags;
        self
    }

    pub fn with_parent<S: Into<String>>(mut self, parent: S) -> Self {
        self.account.parent = parent.into();
        self
    }

    pub fn with_user<S: Into<String>>(mut self, user: S) -> Self {
        self.account.user = user.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tags;

    #[test]
    fn test_builder() {
        let account = Account::builder()
            .with_number("1001")
            .with_name("Cash")
            .with_tag(tags::BALANCE_SHEET)
            .with_tag(tags::INCREASE_ON_DEBIT)
            .with_parent("root-1")
            .with_user("user@example.com")
            .build();
        assert_eq!("1001", account.number);
        assert_eq!("Cash", account.name);
        assert_eq!(
            Tags::from([tags::BALANCE_SHEET, tags::INCREASE_ON_DEBIT]),
            account.tags
        );
        assert_eq!("root-1", account.parent);
        assert_eq!("user@example.com", account.user);
        assert!(account.is_new());
    }

    #[test]
    fn test_display() {
        let account = Account::builder()
            .with_number("1001")
            .with_name("Cash")
            .build();
        assert_eq!("1001 Cash", format!("{}", account));
    }
}
