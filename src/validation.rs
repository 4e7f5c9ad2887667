//! Business-rule validation for charts and accounts.
//!
//! Account validation needs to see sibling and parent accounts; it takes a
//! narrow read-only [`AccountLookup`] capability rather than the full
//! repository, so the rules stay pure over their inputs.

use crate::account::Account;
use crate::chart::ChartOfAccounts;
use crate::error::CoaError;
use crate::tags::{
    self, BALANCE_SHEET, INCOME_STATEMENT, INCOME_STATEMENT_ATTRIBUTE, INCREASE_ON_CREDIT,
    INCREASE_ON_DEBIT,
};

/// Read-only view of a chart's accounts, as needed by account validation.
pub trait AccountLookup {
    fn find_account(&self, chart_id: &str, id: &str) -> Result<Option<Account>, CoaError>;
    fn list_accounts(&self, chart_id: &str) -> Result<Vec<Account>, CoaError>;
}

/// Checks the chart-level rules.
pub fn validate_chart(chart: &ChartOfAccounts) -> Result<(), CoaError> {
    if chart.name.trim().is_empty() {
        return Err(CoaError::validation("The name must be informed"));
    }
    Ok(())
}

/// Checks the account-level rules against the chart's current account set.
///
/// Violations are reported one at a time, in a fixed order, as
/// [`CoaError::Validation`] carrying the rule's message.
pub fn validate_account(
    account: &Account,
    chart_id: &str,
    lookup: &dyn AccountLookup,
) -> Result<(), CoaError> {
    if account.number.trim().is_empty() {
        return Err(CoaError::validation("The number must be informed"));
    }
    if account.name.trim().is_empty() {
        return Err(CoaError::validation("The name must be informed"));
    }
    let balance_sheet = account.tags.contains(BALANCE_SHEET);
    let income_statement = account.tags.contains(INCOME_STATEMENT);
    if !balance_sheet && !income_statement {
        return Err(CoaError::validation(
            "The financial statement must be informed",
        ));
    }
    if balance_sheet && income_statement {
        return Err(CoaError::validation(
            "The statement must be either balance sheet or income statement",
        ));
    }
    let debit = account.tags.contains(INCREASE_ON_DEBIT);
    let credit = account.tags.contains(INCREASE_ON_CREDIT);
    if !debit && !credit {
        return Err(CoaError::validation("The normal balance must be informed"));
    }
    if debit && credit {
        return Err(CoaError::validation(
            "The normal balance must be either debit or credit",
        ));
    }
    let attributes = account
        .tags
        .iter()
        .filter(|t| tags::inherited_category(t) == Some(INCOME_STATEMENT_ATTRIBUTE))
        .count();
    if attributes > 1 {
        return Err(CoaError::validation(
            "Only one income statement attribute is allowed",
        ));
    }
    if account.is_new() {
        let siblings = lookup.list_accounts(chart_id)?;
        if siblings.iter().any(|a| a.number == account.number) {
            return Err(CoaError::validation(
                "An account with this number already exists",
            ));
        }
    }
    if !account.parent.is_empty() {
        let parent = lookup
            .find_account(chart_id, &account.parent)?
            .ok_or_else(|| {
                CoaError::validation(format!("Parent not found: {}", account.parent))
            })?;
        if !account.number.starts_with(&parent.number) {
            return Err(CoaError::validation(
                "The number must start with parent's number",
            ));
        }
        for (tag, category) in tags::INHERITED {
            if parent.tags.contains(tag) && !account.tags.contains(tag) {
                return Err(CoaError::validation(format!(
                    "The {} must be same as the parent",
                    category
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    use crate::tags::{COST, DETAIL, OPERATING, SUMMARY, Tags};

    /// Lookup over a fixed list, ignoring the chart id.
    struct StubLookup {
        accounts: Vec<Account>,
    }

    impl AccountLookup for StubLookup {
        fn find_account(&self, _chart_id: &str, id: &str) -> Result<Option<Account>, CoaError> {
            Ok(self.accounts.iter().find(|a| a.id == id).cloned())
        }

        fn list_accounts(&self, _chart_id: &str) -> Result<Vec<Account>, CoaError> {
            Ok(self.accounts.clone())
        }
    }

    fn empty_lookup() -> StubLookup {
        StubLookup {
            accounts: Vec::new(),
        }
    }

    fn validation_message(result: Result<(), CoaError>) -> Option<String> {
        match result {
            Ok(()) => None,
            Err(CoaError::Validation(msg)) => Some(msg),
            Err(other) => panic!("got {:?}, want validation error", other),
        }
    }

    #[test]
    fn test_chart_name_required() {
        let chart = ChartOfAccounts::new("  ", "user");
        assert_eq!(
            Some("The name must be informed".to_string()),
            validation_message(validate_chart(&chart))
        );
        assert!(validate_chart(&ChartOfAccounts::new("General", "user")).is_ok());
    }

    #[test_case(
        "", "Cash", Tags::from([BALANCE_SHEET, INCREASE_ON_DEBIT])
        => Some("The number must be informed".to_string());
        "blank_number"
    )]
    #[test_case(
        "1001", " ", Tags::from([BALANCE_SHEET, INCREASE_ON_DEBIT])
        => Some("The name must be informed".to_string());
        "blank_name"
    )]
    #[test_case(
        "1001", "Cash", Tags::from([INCREASE_ON_DEBIT])
        => Some("The financial statement must be informed".to_string());
        "no_statement_tag"
    )]
    #[test_case(
        "1001", "Cash", Tags::from([BALANCE_SHEET, INCOME_STATEMENT, INCREASE_ON_DEBIT])
        => Some("The statement must be either balance sheet or income statement".to_string());
        "both_statement_tags"
    )]
    #[test_case(
        "1001", "Cash", Tags::from([BALANCE_SHEET])
        => Some("The normal balance must be informed".to_string());
        "no_normal_balance_tag"
    )]
    #[test_case(
        "1001", "Cash", Tags::from([BALANCE_SHEET, INCREASE_ON_DEBIT, INCREASE_ON_CREDIT])
        => Some("The normal balance must be either debit or credit".to_string());
        "both_normal_balance_tags"
    )]
    #[test_case(
        "4001", "Sales", Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT, OPERATING, COST])
        => Some("Only one income statement attribute is allowed".to_string());
        "two_income_statement_attributes"
    )]
    #[test_case(
        "4001", "Sales", Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT, OPERATING])
        => None;
        "one_income_statement_attribute"
    )]
    #[test_case(
        "1001", "Cash", Tags::from([BALANCE_SHEET, INCREASE_ON_DEBIT])
        => None;
        "valid_account"
    )]
    fn test_field_rules(number: &str, name: &str, tags: Tags) -> Option<String> {
        let account = Account::builder()
            .with_number(number)
            .with_name(name)
            .with_tags(tags)
            .build();
        validation_message(validate_account(&account, "coa-1", &empty_lookup()))
    }

    #[test]
    fn test_duplicate_number_on_create() {
        let lookup = StubLookup {
            accounts: vec![Account::builder()
                .with_id("acc-1")
                .with_number("1001")
                .with_name("Cash")
                .build()],
        };
        let account = Account::builder()
            .with_number("1001")
            .with_name("Petty cash")
            .with_tag(BALANCE_SHEET)
            .with_tag(INCREASE_ON_DEBIT)
            .build();
        assert_eq!(
            Some("An account with this number already exists".to_string()),
            validation_message(validate_account(&account, "coa-1", &lookup))
        );
    }

    #[test]
    fn test_duplicate_number_not_checked_on_update() {
        // An existing account keeping its own number is not a duplicate of
        // itself.
        let stored = Account::builder()
            .with_id("acc-1")
            .with_number("1001")
            .with_name("Cash")
            .with_tag(BALANCE_SHEET)
            .with_tag(INCREASE_ON_DEBIT)
            .build();
        let lookup = StubLookup {
            accounts: vec![stored.clone()],
        };
        assert!(validate_account(&stored, "coa-1", &lookup).is_ok());
    }

    #[test]
    fn test_parent_must_exist() {
        let account = Account::builder()
            .with_number("1001")
            .with_name("Cash")
            .with_tag(BALANCE_SHEET)
            .with_tag(INCREASE_ON_DEBIT)
            .with_parent("missing")
            .build();
        assert_eq!(
            Some("Parent not found: missing".to_string()),
            validation_message(validate_account(&account, "coa-1", &empty_lookup()))
        );
    }

    fn parent_lookup(parent_tags: Tags) -> StubLookup {
        StubLookup {
            accounts: vec![Account::builder()
                .with_id("root-1")
                .with_number("4000")
                .with_name("Revenue")
                .with_tags(parent_tags)
                .build()],
        }
    }

    #[test]
    fn test_number_must_start_with_parents_number() {
        let lookup = parent_lookup(Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT, SUMMARY]));
        let child = Account::builder()
            .with_number("5001")
            .with_name("Sales")
            .with_tag(INCOME_STATEMENT)
            .with_tag(INCREASE_ON_CREDIT)
            .with_parent("root-1")
            .build();
        assert_eq!(
            Some("The number must start with parent's number".to_string()),
            validation_message(validate_account(&child, "coa-1", &lookup))
        );
    }

    #[test_case(
        Tags::from([BALANCE_SHEET, INCREASE_ON_CREDIT])
        => Some("The financial statement must be same as the parent".to_string());
        "statement_not_mirrored"
    )]
    #[test_case(
        Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT])
        => Some("The income statement attribute must be same as the parent".to_string());
        "attribute_not_mirrored"
    )]
    #[test_case(
        Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT, OPERATING])
        => None;
        "all_inherited_tags_mirrored"
    )]
    #[test_case(
        Tags::from([INCOME_STATEMENT, INCREASE_ON_CREDIT, OPERATING, DETAIL])
        => None;
        "child_may_add_non_inherited_tags"
    )]
    fn test_inherited_tags(child_tags: Tags) -> Option<String> {
        let lookup = parent_lookup(Tags::from([
            INCOME_STATEMENT,
            INCREASE_ON_CREDIT,
            OPERATING,
            SUMMARY,
        ]));
        let child = Account::builder()
            .with_number("4001")
            .with_name("Sales")
            .with_tags(child_tags)
            .with_parent("root-1")
            .build();
        validation_message(validate_account(&child, "coa-1", &lookup))
    }
}
