//! Payment records for recurring items
//!
//! A fixed expense or subscription counts as paid for a month only when a
//! record for that (expense, month) pair exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::period::YearMonth;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentRecord {
    /// The fixed expense or subscription that was paid
    pub expense_id: ExpenseId,

    /// The month the payment covers
    pub month: YearMonth,

    /// When the payment was made, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_on: Option<NaiveDate>,
}

impl PaymentRecord {
    pub fn new(expense_id: impl Into<ExpenseId>, month: YearMonth) -> Self {
        Self {
            expense_id: expense_id.into(),
            month,
            paid_on: None,
        }
    }

    /// True if this record covers `expense_id` in `month`
    pub fn covers(&self, expense_id: &ExpenseId, month: YearMonth) -> bool {
        &self.expense_id == expense_id && self.month == month
    }
}
