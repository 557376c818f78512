//! Ad-hoc expense model
//!
//! One-off charges against an account (a repair, a gift, a fine). Unlike
//! recurring items, an ad-hoc expense carries its own paid flag.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, ExpenseId};
use super::money::Money;
use super::recurring::validate_common;

/// A one-off expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expense {
    pub id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub paid: bool,
}

impl Expense {
    /// Create a new unpaid expense
    pub fn new(
        id: impl Into<ExpenseId>,
        account_id: impl Into<AccountId>,
        label: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            label: label.into(),
            amount,
            date,
            paid: false,
        }
    }

    pub fn paid(mut self) -> Self {
        self.paid = true;
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_common(&self.id, &self.label, self.amount)
    }
}

/// Validation errors shared by fixed expenses, subscriptions and expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyId,
    EmptyLabel,
    NegativeAmount(Money),
    AmountTooLarge(Money),
    InvalidDueDay(u32),
    InvalidBillingMonth(u32),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense id cannot be empty"),
            Self::EmptyLabel => write!(f, "Expense label cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} exceeds the maximum of {}", amount, Money::MAX)
            }
            Self::InvalidDueDay(day) => write!(f, "Due day must be 1-31 (got {})", day),
            Self::InvalidBillingMonth(month) => {
                write!(f, "Billing month must be 1-12 (got {})", month)
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
