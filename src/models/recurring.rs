//! Recurring obligations: fixed monthly expenses and subscriptions
//!
//! These are templates. Whether an instance was paid for a given month is
//! tracked separately through [`PaymentRecord`](super::payment::PaymentRecord).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::ExpenseValidationError;
use super::ids::{AccountId, ExpenseId};
use super::money::Money;
use super::period::YearMonth;

/// A monthly obligation with a constant amount (mortgage, insurance, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixedExpense {
    pub id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Money,
    /// Day of month the charge is due (1-31, clamped to short months)
    pub due_day: u32,
}

impl FixedExpense {
    pub fn new(
        id: impl Into<ExpenseId>,
        account_id: impl Into<AccountId>,
        label: impl Into<String>,
        amount: Money,
        due_day: u32,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            label: label.into(),
            amount,
            due_day,
        }
    }

    /// Due date of this expense within `month`
    pub fn due_date(&self, month: YearMonth) -> NaiveDate {
        month.day_clamped(self.due_day)
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_common(&self.id, &self.label, self.amount)?;
        validate_due_day(self.due_day)
    }
}

/// How often a subscription is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "cycle", rename_all = "lowercase")]
pub enum BillingCycle {
    /// Charged every month of the active window
    #[default]
    Monthly,
    /// Charged once a year, in `month` (1-12)
    Annual { month: u32 },
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Annual { month } => write!(f, "annual (month {:02})", month),
        }
    }
}

/// A recurring charge bounded by an active date window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subscription {
    pub id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Money,
    #[serde(default = "default_due_day")]
    pub due_day: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub billing: BillingCycle,
}

fn default_due_day() -> u32 {
    1
}

impl Subscription {
    /// Create a monthly subscription starting on `start_date` with no end
    pub fn new(
        id: impl Into<ExpenseId>,
        account_id: impl Into<AccountId>,
        label: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            account_id: account_id.into(),
            label: label.into(),
            amount,
            due_day: default_due_day(),
            start_date,
            end_date: None,
            billing: BillingCycle::Monthly,
        }
    }

    pub fn with_due_day(mut self, due_day: u32) -> Self {
        self.due_day = due_day;
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn annual(mut self, month: u32) -> Self {
        self.billing = BillingCycle::Annual { month };
        self
    }

    /// Whether this subscription is charged in `month`
    ///
    /// The window is month-granular: the months containing `start_date` and
    /// `end_date` both count as active.
    pub fn is_active_in(&self, month: YearMonth) -> bool {
        if month < YearMonth::from_date(self.start_date) {
            return false;
        }
        if let Some(end) = self.end_date {
            if month > YearMonth::from_date(end) {
                return false;
            }
        }
        match self.billing {
            BillingCycle::Monthly => true,
            BillingCycle::Annual { month: billed } => month.month() == billed,
        }
    }

    /// Due date of this subscription within `month`
    pub fn due_date(&self, month: YearMonth) -> NaiveDate {
        month.day_clamped(self.due_day)
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_common(&self.id, &self.label, self.amount)?;
        validate_due_day(self.due_day)?;

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ExpenseValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        if let BillingCycle::Annual { month } = self.billing {
            if !(1..=12).contains(&month) {
                return Err(ExpenseValidationError::InvalidBillingMonth(month));
            }
        }

        Ok(())
    }
}

pub(crate) fn validate_common(
    id: &ExpenseId,
    label: &str,
    amount: Money,
) -> Result<(), ExpenseValidationError> {
    if id.is_blank() {
        return Err(ExpenseValidationError::EmptyId);
    }
    if label.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyLabel);
    }
    if amount.is_negative() {
        return Err(ExpenseValidationError::NegativeAmount(amount));
    }
    if amount > Money::MAX {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

fn validate_due_day(day: u32) -> Result<(), ExpenseValidationError> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(ExpenseValidationError::InvalidDueDay(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_open_ended_subscription_window() {
        let sub = Subscription::new("s1", "A1", "Streaming", Money::from_cents(1600), date(2026, 3, 1));

        assert!(!sub.is_active_in(ym(2026, 2)));
        assert!(sub.is_active_in(ym(2026, 3)));
        assert!(sub.is_active_in(ym(2026, 12)));
    }

    #[test]
    fn test_end_month_counts_as_active() {
        let sub = Subscription::new("s1", "A1", "VPN", Money::from_cents(1299), date(2026, 1, 20))
            .with_end_date(date(2026, 6, 10));

        assert!(sub.is_active_in(ym(2026, 1)));
        assert!(sub.is_active_in(ym(2026, 6)));
        assert!(!sub.is_active_in(ym(2026, 7)));
    }

    #[test]
    fn test_annual_subscription_only_in_billing_month() {
        let sub = Subscription::new("s1", "A1", "Messenger", Money::from_cents(3399), date(2026, 1, 1))
            .annual(9);

        assert!(sub.is_active_in(ym(2026, 9)));
        assert!(!sub.is_active_in(ym(2026, 8)));
        assert!(!sub.is_active_in(ym(2026, 10)));
    }

    #[test]
    fn test_fixed_due_date_is_clamped() {
        let fixed = FixedExpense::new("f1", "A1", "Rent", Money::from_cents(50000), 31);
        assert_eq!(fixed.due_date(ym(2026, 4)), date(2026, 4, 30));
        assert_eq!(fixed.due_date(ym(2026, 1)), date(2026, 1, 31));
    }

    #[test]
    fn test_fixed_validation() {
        assert!(FixedExpense::new("f1", "A1", "Rent", Money::from_cents(1), 5)
            .validate()
            .is_ok());
        assert_eq!(
            FixedExpense::new("f1", "A1", "Rent", Money::from_cents(-1), 5).validate(),
            Err(ExpenseValidationError::NegativeAmount(Money::from_cents(-1)))
        );
        assert_eq!(
            FixedExpense::new("f1", "A1", "Rent", Money::zero(), 32).validate(),
            Err(ExpenseValidationError::InvalidDueDay(32))
        );
        assert_eq!(
            FixedExpense::new("f1", "A1", " ", Money::zero(), 1).validate(),
            Err(ExpenseValidationError::EmptyLabel)
        );
    }

    #[test]
    fn test_subscription_validation() {
        let sub = Subscription::new("s1", "A1", "VPN", Money::zero(), date(2026, 5, 1))
            .with_end_date(date(2026, 4, 1));
        assert!(matches!(
            sub.validate(),
            Err(ExpenseValidationError::EndBeforeStart { .. })
        ));

        let sub = Subscription::new("s1", "A1", "VPN", Money::zero(), date(2026, 5, 1)).annual(13);
        assert_eq!(
            sub.validate(),
            Err(ExpenseValidationError::InvalidBillingMonth(13))
        );
    }

    #[test]
    fn test_subscription_defaults_on_deserialize() {
        let json = r#"{
            "id": "s1",
            "account_id": "A1",
            "label": "Cloud storage",
            "amount": 9.99,
            "start_date": "2026-01-01"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.due_day, 1);
        assert_eq!(sub.billing, BillingCycle::Monthly);
        assert_eq!(sub.end_date, None);
    }

    #[test]
    fn test_billing_serialization() {
        let json = serde_json::to_value(BillingCycle::Annual { month: 5 }).unwrap();
        assert_eq!(json, serde_json::json!({"cycle": "annual", "month": 5}));
        let json = serde_json::to_value(BillingCycle::Monthly).unwrap();
        assert_eq!(json, serde_json::json!({"cycle": "monthly"}));
    }
}
