//! Account model
//!
//! Represents the bank accounts household expenses are charged against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// A bank account (or any bucket expenses are charged to)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (e.g., "Joint Checking")
    pub name: String,

    /// Balance the year starts with, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Money>,

    /// Notes about this account
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Account {
    /// Create a new account without an opening balance
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            opening_balance: None,
            notes: String::new(),
        }
    }

    /// Create a new account with an opening balance
    pub fn with_opening_balance(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        opening_balance: Money,
    ) -> Self {
        let mut account = Self::new(id, name);
        account.opening_balance = Some(opening_balance);
        account
    }

    /// Opening balance, treating a missing one as zero
    pub fn opening_or_zero(&self) -> Money {
        self.opening_balance.unwrap_or_default()
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.id.is_blank() {
            return Err(AccountValidationError::EmptyId);
        }

        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if let Some(balance) = self.opening_balance {
            if !balance.is_within_limit() {
                return Err(AccountValidationError::BalanceOutOfRange(balance));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    EmptyName,
    NameTooLong(usize),
    BalanceOutOfRange(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Account id cannot be empty"),
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::BalanceOutOfRange(balance) => {
                write!(f, "Opening balance {} exceeds the limit of {}", balance, Money::MAX)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("A1", "Joint");
        assert_eq!(account.id.as_str(), "A1");
        assert_eq!(account.opening_balance, None);
        assert_eq!(account.opening_or_zero(), Money::zero());
    }

    #[test]
    fn test_with_opening_balance() {
        let account = Account::with_opening_balance("A1", "Joint", Money::from_cents(100000));
        assert_eq!(account.opening_or_zero().cents(), 100000);
    }

    #[test]
    fn test_validation() {
        assert!(Account::new("A1", "Joint").validate().is_ok());
        assert_eq!(
            Account::new("A1", "  ").validate(),
            Err(AccountValidationError::EmptyName)
        );
        assert_eq!(
            Account::new("", "Joint").validate(),
            Err(AccountValidationError::EmptyId)
        );
        assert!(matches!(
            Account::new("A1", "x".repeat(101)).validate(),
            Err(AccountValidationError::NameTooLong(101))
        ));
    }

    #[test]
    fn test_opening_balance_limit() {
        let overdrawn = Account::with_opening_balance("A1", "Joint", -Money::MAX);
        assert!(overdrawn.validate().is_ok());

        let huge = Money::from_cents(i64::MIN);
        assert_eq!(
            Account::with_opening_balance("A1", "Joint", huge).validate(),
            Err(AccountValidationError::BalanceOutOfRange(huge))
        );
    }

    #[test]
    fn test_serialization_skips_empty_optionals() {
        let json = serde_json::to_value(Account::new("A1", "Joint")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "A1", "name": "Joint"}));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<Account, _> =
            serde_json::from_str(r#"{"id": "A1", "name": "Joint", "colour": "red"}"#);
        assert!(result.is_err());
    }
}
