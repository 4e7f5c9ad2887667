use crate::account::{Account, AccountBuilder};
use crate::chart::ChartOfAccounts;
use crate::repository::CoaRepository;
use crate::store::MemoryStore;
use crate::tags;

/// A memory-backed repository with one saved chart, ready for account
/// operations.
pub fn repo_and_chart() -> (CoaRepository<MemoryStore>, ChartOfAccounts) {
    let repo = CoaRepository::new(MemoryStore::new());
    let chart = repo
        .save_chart(ChartOfAccounts::new("General", "user@example.com"))
        .expect("save chart");
    (repo, chart)
}

/// Builder for a valid balance sheet account that increases on debit.
pub fn asset_account(number: &str, name: &str) -> AccountBuilder {
    Account::builder()
        .with_number(number)
        .with_name(name)
        .with_tag(tags::BALANCE_SHEET)
        .with_tag(tags::INCREASE_ON_DEBIT)
}

/// Builder for a valid income statement account that increases on credit.
pub fn revenue_account(number: &str, name: &str) -> AccountBuilder {
    Account::builder()
        .with_number(number)
        .with_name(name)
        .with_tag(tags::INCOME_STATEMENT)
        .with_tag(tags::INCREASE_ON_CREDIT)
}
