//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the ledger, calculator and export layers.

pub mod account;
pub mod expense;
pub mod export;
pub mod fixed;
pub mod payment;
pub mod report;
pub mod session;
pub mod subscription;

pub use account::{handle_account_command, AccountCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, handle_import, ExportCommands};
pub use fixed::{handle_fixed_command, FixedCommands};
pub use payment::{handle_pay, handle_unpay};
pub use report::{handle_month, handle_overview, handle_summary};
pub use session::Session;
pub use subscription::{handle_subscription_command, SubscriptionCommands};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{AccountId, Ledger, Money, YearMonth};

/// Parse a user-entered amount
pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| {
        BudgetError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50' or '12'. Error: {}",
            input, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", input))
    })
}

/// Parse a `YYYY-MM` month
pub(crate) fn parse_month(input: &str) -> BudgetResult<YearMonth> {
    input
        .parse()
        .map_err(|e| BudgetError::Validation(format!("{}", e)))
}

/// The month to show when none was given: today's month in the ledger year,
/// January otherwise
pub(crate) fn default_month(year: i32) -> YearMonth {
    let current = YearMonth::current();
    if current.year() == year {
        current
    } else {
        YearMonth::new(year, 1).unwrap_or(current)
    }
}

/// Find an account by id, or by name (case-insensitive)
pub(crate) fn resolve_account(ledger: &Ledger, input: &str) -> BudgetResult<AccountId> {
    let id = AccountId::from(input);
    if ledger.has_account(&id) {
        return Ok(id);
    }

    let mut matches = ledger
        .accounts()
        .filter(|a| a.name.eq_ignore_ascii_case(input.trim()));

    match (matches.next(), matches.next()) {
        (Some(account), None) => Ok(account.id.clone()),
        (Some(_), Some(_)) => Err(BudgetError::Validation(format!(
            "More than one account is named '{}'; use its id",
            input
        ))),
        (None, _) => Err(BudgetError::account_not_found(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    #[test]
    fn test_resolve_account() {
        let mut ledger = Ledger::new(2026);
        ledger.add_account(Account::new("joint", "Joint Account")).unwrap();
        ledger.add_account(Account::new("b1", "Twin")).unwrap();
        ledger.add_account(Account::new("b2", "twin")).unwrap();

        assert_eq!(resolve_account(&ledger, "joint").unwrap().as_str(), "joint");
        assert_eq!(
            resolve_account(&ledger, "joint account").unwrap().as_str(),
            "joint"
        );
        assert!(resolve_account(&ledger, "twin").unwrap_err().is_validation());
        assert!(resolve_account(&ledger, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12,50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("1.234").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2026").is_err());
        assert_eq!(parse_month("2026-07").unwrap(), YearMonth::new(2026, 7).unwrap());
        assert!(parse_month("2026-13").is_err());
    }

    #[test]
    fn test_default_month_outside_current_year() {
        assert_eq!(default_month(1999), YearMonth::new(1999, 1).unwrap());
    }
}
