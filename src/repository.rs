//! The repository engine: load-validate-mutate-cascade-store sequences for
//! charts and accounts.
//!
//! Every mutation rewrites the affected collection as a single blob, which
//! is what keeps ordering and single-key atomicity sufficient. There is no
//! cross-key transaction: a cascade save that fails leaves the primary
//! record persisted and the derived record stale until retried. The engine
//! assumes at most one logical writer per chart at a time.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::account::Account;
use crate::chart::ChartOfAccounts;
use crate::error::{CoaError, StoreError};
use crate::store::KeyValueStore;
use crate::tags::{DETAIL, RETAINED_EARNINGS, SUMMARY};
use crate::validation::{self, AccountLookup};

/// Storage key of the chart collection.
const CHARTS_KEY: &str = "charts-of-accounts";

/// Storage key of one chart's account collection.
fn accounts_key(chart_id: &str) -> String {
    format!("accounts/{}", chart_id)
}

/// Repository of charts of accounts over a key-value store.
pub struct CoaRepository<S> {
    store: S,
}

impl<S: KeyValueStore> CoaRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All charts, in stored order (ascending by name).
    pub fn list_charts(&self) -> Result<Vec<ChartOfAccounts>, CoaError> {
        Ok(self.get_collection(CHARTS_KEY)?)
    }

    /// The chart with the given id, if any.
    pub fn get_chart(&self, id: &str) -> Result<Option<ChartOfAccounts>, CoaError> {
        Ok(self.list_charts()?.into_iter().find(|c| c.id == id))
    }

    /// Validates and persists `chart`, assigning an id and `created` stamp
    /// on first save. The whole chart collection is re-sorted by name and
    /// rewritten. Returns the saved chart.
    pub fn save_chart(&self, mut chart: ChartOfAccounts) -> Result<ChartOfAccounts, CoaError> {
        validation::validate_chart(&chart)?;
        let mut charts = self.list_charts()?;
        chart.as_of = Some(Utc::now());
        if chart.is_new() {
            chart.id = Uuid::new_v4().to_string();
            chart.created = chart.as_of;
            charts.push(chart.clone());
        } else if let Some(entry) = charts.iter_mut().find(|c| c.id == chart.id) {
            *entry = chart.clone();
        }
        charts.sort_by(|a, b| a.name.cmp(&b.name));
        self.put_collection(CHARTS_KEY, &charts)?;
        debug!(id = %chart.id, name = %chart.name, "Saved chart of accounts");
        Ok(chart)
    }

    /// All accounts of a chart, ascending by number.
    pub fn list_accounts(&self, chart_id: &str) -> Result<Vec<Account>, CoaError> {
        if chart_id.is_empty() {
            return Err(CoaError::InvalidArgument("chart id is empty".to_string()));
        }
        let mut accounts: Vec<Account> = self.get_collection(&accounts_key(chart_id))?;
        accounts.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(accounts)
    }

    /// The account with the given id within a chart, if any.
    pub fn get_account(&self, chart_id: &str, id: &str) -> Result<Option<Account>, CoaError> {
        Ok(self
            .list_accounts(chart_id)?
            .into_iter()
            .find(|a| a.id == id))
    }

    /// Validates and persists `account` within the chart, then runs the
    /// cascades its tags call for.
    ///
    /// In order: the tag set is normalized to catalog members (recording
    /// whether `retainedEarnings` was among the input tags, and defaulting
    /// `detail` onto new accounts); on update, `number`, `parent` and
    /// `created` are pinned to their stored values; the account is
    /// validated against the chart's current account set; an id and
    /// `created` stamp are assigned on first save; the chart's whole
    /// account collection is rewritten. After the write, the
    /// retained-earnings marker updates the owning chart, and a parent
    /// still tagged `detail` is re-tagged `summary` via a recursive
    /// re-entry of this save.
    pub fn save_account(&self, chart_id: &str, account: Account) -> Result<Account, CoaError> {
        self.save_account_in_chain(chart_id, account, &mut Vec::new())
    }

    /// `save_account` with the ids already saved by the current cascade
    /// chain threaded through, so a corrupt parent cycle in stored data is
    /// rejected instead of recursing forever.
    fn save_account_in_chain(
        &self,
        chart_id: &str,
        mut account: Account,
        chain: &mut Vec<String>,
    ) -> Result<Account, CoaError> {
        if chart_id.is_empty() {
            return Err(CoaError::InvalidArgument("chart id is empty".to_string()));
        }
        if !account.id.is_empty() && chain.contains(&account.id) {
            return Err(CoaError::validation(format!(
                "Parent cycle detected: {}",
                account.id
            )));
        }

        let retained_earnings = account.tags.contains(RETAINED_EARNINGS);
        let mut tags = account.tags.normalized();
        if account.is_new() && !tags.contains(DETAIL) {
            tags.push(DETAIL);
        }
        account.tags = tags;

        if !account.is_new() {
            let old = self.get_account(chart_id, &account.id)?.ok_or_else(|| {
                CoaError::validation(format!("Account not found: {}", account.id))
            })?;
            account.number = old.number;
            account.parent = old.parent;
            account.created = old.created;
        }

        validation::validate_account(&account, chart_id, self)?;

        let key = accounts_key(chart_id);
        let mut accounts: Vec<Account> = self.get_collection(&key)?;
        account.as_of = Some(Utc::now());
        if account.is_new() {
            account.id = Uuid::new_v4().to_string();
            account.created = account.as_of;
            accounts.push(account.clone());
        } else if let Some(entry) = accounts.iter_mut().find(|a| a.id == account.id) {
            *entry = account.clone();
        }
        self.put_collection(&key, &accounts)?;
        debug!(chart_id, account = %account, "Saved account");
        chain.push(account.id.clone());

        if retained_earnings {
            let mut chart = self.get_chart(chart_id)?.ok_or_else(|| {
                CoaError::validation(format!("Chart of accounts not found: {}", chart_id))
            })?;
            chart.retained_earnings_account = account.id.clone();
            self.save_chart(chart)?;
            debug!(chart_id, account_id = %account.id, "Designated retained earnings account");
        }

        if !account.parent.is_empty() {
            let mut parent = self
                .get_account(chart_id, &account.parent)?
                .ok_or_else(|| {
                    CoaError::validation(format!("Parent not found: {}", account.parent))
                })?;
            let mut changed = parent.tags.remove(DETAIL);
            if !parent.tags.contains(SUMMARY) {
                parent.tags.push(SUMMARY);
                changed = true;
            }
            if changed {
                debug!(chart_id, parent = %parent, "Reclassifying parent as summary");
                self.save_account_in_chain(chart_id, parent, chain)?;
            }
        }

        Ok(account)
    }

    /// For each requested account id, the position in the chart's stored
    /// (load-order, not number-sorted) account collection of the last
    /// entry with that id whose tags include all of `tags`, or `-1` when
    /// there is no such entry.
    pub fn indexes(
        &self,
        chart_id: &str,
        account_ids: &[String],
        tags: &[String],
    ) -> Result<Vec<i64>, CoaError> {
        if chart_id.is_empty() {
            return Err(CoaError::InvalidArgument("chart id is empty".to_string()));
        }
        let accounts: Vec<Account> = self.get_collection(&accounts_key(chart_id))?;
        let mut result = Vec::with_capacity(account_ids.len());
        for id in account_ids {
            let mut index: i64 = -1;
            for (j, account) in accounts.iter().enumerate() {
                if &account.id == id && account.tags.contains_all(tags) {
                    index = j as i64;
                }
            }
            result.push(index);
        }
        Ok(result)
    }

    fn get_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.store.get(key)? {
            Some(data) if !data.is_empty() => Ok(rmp_serde::from_slice(&data)?),
            _ => Ok(Vec::new()),
        }
    }

    fn put_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let data = rmp_serde::to_vec_named(&items)?;
        self.store.put(key, &data)
    }
}

impl<S: KeyValueStore> AccountLookup for CoaRepository<S> {
    fn find_account(&self, chart_id: &str, id: &str) -> Result<Option<Account>, CoaError> {
        self.get_account(chart_id, id)
    }

    fn list_accounts(&self, chart_id: &str) -> Result<Vec<Account>, CoaError> {
        CoaRepository::list_accounts(self, chart_id)
    }
}
