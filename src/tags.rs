//! Tag vocabulary and the ordered tag collection attached to accounts.

use std::collections::HashSet;

use lazy_static::lazy_static;
use serde_derive::{Deserialize, Serialize};

/// Classifies an account onto the balance sheet.
pub const BALANCE_SHEET: &str = "balanceSheet";
/// Classifies an account onto the income statement.
pub const INCOME_STATEMENT: &str = "incomeStatement";
/// Income statement attribute: operating revenue/expense.
pub const OPERATING: &str = "operating";
/// Income statement attribute: deduction from gross revenue.
pub const DEDUCTION: &str = "deduction";
/// Income statement attribute: sales tax.
pub const SALES_TAX: &str = "salesTax";
/// Income statement attribute: cost of goods/services sold.
pub const COST: &str = "cost";
/// Income statement attribute: non-operating tax.
pub const NON_OPERATING_TAX: &str = "nonOperatingTax";
/// Income statement attribute: income tax.
pub const INCOME_TAX: &str = "incomeTax";
/// Income statement attribute: dividends.
pub const DIVIDENDS: &str = "dividends";

/// Normal balance: the account increases on debit.
pub const INCREASE_ON_DEBIT: &str = "increaseOnDebit";
/// Normal balance: the account increases on credit.
pub const INCREASE_ON_CREDIT: &str = "increaseOnCredit";
/// Structural role: leaf account with no children. Defaulted onto new
/// accounts that don't carry it.
pub const DETAIL: &str = "detail";
/// Structural role: account with at least one child.
pub const SUMMARY: &str = "summary";

/// Marker tag recognized on input to designate the chart's retained-earnings
/// account. Never persisted as part of an account's tag set.
pub const RETAINED_EARNINGS: &str = "retainedEarnings";

/// Semantic category of the statement classification tags.
pub const FINANCIAL_STATEMENT: &str = "financial statement";
/// Semantic category of the income statement attribute tags.
pub const INCOME_STATEMENT_ATTRIBUTE: &str = "income statement attribute";

/// Tags a child account must mirror when its parent carries them, paired
/// with the category named in validation messages. Order here fixes the
/// order inheritance violations are reported in.
pub const INHERITED: [(&str, &str); 9] = [
    (BALANCE_SHEET, FINANCIAL_STATEMENT),
    (INCOME_STATEMENT, FINANCIAL_STATEMENT),
    (OPERATING, INCOME_STATEMENT_ATTRIBUTE),
    (DEDUCTION, INCOME_STATEMENT_ATTRIBUTE),
    (SALES_TAX, INCOME_STATEMENT_ATTRIBUTE),
    (COST, INCOME_STATEMENT_ATTRIBUTE),
    (NON_OPERATING_TAX, INCOME_STATEMENT_ATTRIBUTE),
    (INCOME_TAX, INCOME_STATEMENT_ATTRIBUTE),
    (DIVIDENDS, INCOME_STATEMENT_ATTRIBUTE),
];

/// Tags an account carries for itself only.
pub const NON_INHERITED: [&str; 4] = [INCREASE_ON_DEBIT, INCREASE_ON_CREDIT, DETAIL, SUMMARY];

lazy_static! {
    static ref INHERITED_SET: HashSet<&'static str> =
        INHERITED.iter().map(|(tag, _)| *tag).collect();
    static ref NON_INHERITED_SET: HashSet<&'static str> = NON_INHERITED.iter().copied().collect();
}

/// Returns the category an inherited tag is reported under, or `None` for
/// tags that are not inherited.
pub fn inherited_category(tag: &str) -> Option<&'static str> {
    INHERITED
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, category)| *category)
}

/// Whether `tag` belongs to either catalog. Tags outside the catalogs are
/// dropped when an account is saved.
pub fn in_catalog(tag: &str) -> bool {
    INHERITED_SET.contains(tag) || NON_INHERITED_SET.contains(tag)
}

/// Ordered collection of tag labels on an account.
///
/// Order is preserved as given; membership queries are linear scans, which
/// is fine for the handful of tags an account carries.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.0.iter().position(|t| t == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index_of(tag).is_some()
    }

    pub fn contains_all(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.contains(t))
    }

    pub fn push<S: Into<String>>(&mut self, tag: S) {
        self.0.push(tag.into());
    }

    /// Removes the first occurrence of `tag`; returns whether anything was
    /// removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.index_of(tag) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    /// Copy of this set keeping only catalog members, preserving order.
    pub fn normalized(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|t| in_catalog(t))
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl<const N: usize> From<[&str; N]> for Tags {
    fn from(tags: [&str; N]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl std::fmt::Display for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", itertools::join(self.0.iter(), ", "))
    }
}
