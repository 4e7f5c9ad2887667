//! The `ChartOfAccounts` entity.

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

/// A named collection of accounts belonging to one bookkeeping ledger.
///
/// An empty `id` marks an unsaved chart; the repository assigns the id and
/// the `created` stamp on first save. `retained_earnings_account` is set by
/// the retained-earnings cascade, not by callers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    pub id: String,
    pub name: String,
    #[serde(rename = "retainedEarningsAccount")]
    pub retained_earnings_account: String,
    pub user: String,
    #[serde(rename = "timestamp")]
    pub as_of: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
}

impl ChartOfAccounts {
    pub fn new<S: Into<String>, U: Into<String>>(name: S, user: U) -> Self {
        Self {
            name: name.into(),
            user: user.into(),
            ..Default::default()
        }
    }

    /// Whether this chart has not yet been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}
