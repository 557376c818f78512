//! Monthly totals, pending amounts and per-account summaries

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{AccountId, Expense, Ledger, Money, YearMonth};

use super::month::month_items;

/// Paid and pending totals for one account across the recorded months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub name: String,
    /// Opening balance (zero when none was set)
    pub opening_balance: Money,
    /// Opening balance minus everything paid
    pub balance: Money,
    pub total_paid: Money,
    pub total_pending: Money,
}

/// Ad-hoc expenses dated inside the ledger year
///
/// Anything else is excluded from every aggregate.
pub(crate) fn ad_hoc_in_year(ledger: &Ledger) -> impl Iterator<Item = &Expense> {
    ledger.expenses().iter().filter(move |e| {
        let inside = ledger.covers_date(e.date);
        if !inside {
            debug!(
                expense = %e.id,
                date = %e.date,
                year = ledger.year(),
                "expense dated outside the ledger year, excluded"
            );
        }
        inside
    })
}

/// Sum of fixed expenses and subscriptions due in `month`
///
/// Ad-hoc expenses never contribute. Months outside the ledger year are zero.
pub fn total_fixed_for_month(ledger: &Ledger, month: YearMonth) -> Money {
    if !ledger.covers_month(month) {
        return Money::zero();
    }

    let fixed: Money = ledger.fixed_expenses().iter().map(|f| f.amount).sum();
    let subscriptions: Money = ledger
        .subscriptions()
        .iter()
        .filter(|s| s.is_active_in(month))
        .map(|s| s.amount)
        .sum();

    fixed + subscriptions
}

/// Sum of ad-hoc expenses dated in `month`
pub fn total_expenses_for_month(ledger: &Ledger, month: YearMonth) -> Money {
    if !ledger.covers_month(month) {
        return Money::zero();
    }

    ad_hoc_in_year(ledger)
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Unpaid amount charged to `account_id` in `month`
///
/// Recurring items count as paid only when a payment record exists for that
/// month; ad-hoc expenses use their own flag.
pub fn pending_for_account(ledger: &Ledger, account_id: &AccountId, month: YearMonth) -> Money {
    month_items(ledger, month)
        .iter()
        .filter(|item| &item.account_id == account_id && !item.paid)
        .map(|item| item.amount)
        .sum()
}

/// Unpaid amount across all accounts in `month`
pub fn pending_for_month(ledger: &Ledger, month: YearMonth) -> Money {
    month_items(ledger, month)
        .iter()
        .filter(|item| !item.paid)
        .map(|item| item.amount)
        .sum()
}

/// Months of the ledger year holding at least one ad-hoc expense or payment
/// record, ascending
pub fn recorded_months(ledger: &Ledger) -> Vec<YearMonth> {
    let mut months: BTreeSet<YearMonth> = ad_hoc_in_year(ledger)
        .map(|e| YearMonth::from_date(e.date))
        .collect();

    months.extend(
        ledger
            .payments()
            .iter()
            .map(|p| p.month)
            .filter(|m| ledger.covers_month(*m)),
    );

    months.into_iter().collect()
}

/// Balance, paid and pending totals for one account
///
/// Totals aggregate over [`recorded_months`]. Fails with `NotFound` for an
/// unknown account.
pub fn account_summary(ledger: &Ledger, account_id: &AccountId) -> BudgetResult<AccountSummary> {
    let account = ledger
        .account(account_id)
        .ok_or_else(|| BudgetError::account_not_found(account_id.as_str()))?;

    let mut total_paid = Money::zero();
    let mut total_pending = Money::zero();

    for month in recorded_months(ledger) {
        for item in month_items(ledger, month)
            .into_iter()
            .filter(|item| &item.account_id == account_id)
        {
            if item.paid {
                total_paid += item.amount;
            } else {
                total_pending += item.amount;
            }
        }
    }

    let opening_balance = account.opening_or_zero();

    Ok(AccountSummary {
        account_id: account.id.clone(),
        name: account.name.clone(),
        opening_balance,
        balance: opening_balance - total_paid,
        total_paid,
        total_pending,
    })
}

/// Summaries for every account, in id order
pub fn all_account_summaries(ledger: &Ledger) -> BudgetResult<Vec<AccountSummary>> {
    ledger
        .accounts()
        .map(|account| account_summary(ledger, &account.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, ExpenseId, FixedExpense, Subscription};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    /// One account, one fixed expense, one unpaid ad-hoc expense in January
    fn scenario() -> Ledger {
        let mut ledger = Ledger::new(2026);
        ledger
            .add_account(Account::with_opening_balance("A1", "Joint", money("1000.00")))
            .unwrap();
        ledger
            .add_fixed_expense(FixedExpense::new("f1", "A1", "Insurance", money("50.00"), 5))
            .unwrap();
        ledger
            .add_expense(Expense::new("e1", "A1", "Plumber", money("20.00"), date(2026, 1, 10)))
            .unwrap();
        ledger
    }

    #[test]
    fn test_scenario_totals() {
        let ledger = scenario();
        let a1 = AccountId::from("A1");

        assert_eq!(total_fixed_for_month(&ledger, ym(2026, 1)), money("50.00"));
        assert_eq!(pending_for_account(&ledger, &a1, ym(2026, 1)), money("70.00"));

        let summary = account_summary(&ledger, &a1).unwrap();
        assert_eq!(summary.balance, money("1000.00"));
        assert_eq!(summary.total_paid, money("0.00"));
        assert_eq!(summary.total_pending, money("70.00"));
    }

    #[test]
    fn test_largest_amounts_add_up() {
        let mut ledger = Ledger::new(2026);
        ledger.add_account(Account::new("A1", "Joint")).unwrap();
        ledger
            .add_fixed_expense(FixedExpense::new("f1", "A1", "Big", Money::MAX, 1))
            .unwrap();
        for id in ["e1", "e2", "e3"] {
            ledger
                .add_expense(Expense::new(id, "A1", "Big", Money::MAX, date(2026, 1, 2)))
                .unwrap();
        }
        let a1 = AccountId::from("A1");
        let max = Money::MAX.cents();

        assert_eq!(total_expenses_for_month(&ledger, ym(2026, 1)).cents(), 3 * max);
        assert_eq!(pending_for_account(&ledger, &a1, ym(2026, 1)).cents(), 4 * max);
        assert_eq!(account_summary(&ledger, &a1).unwrap().total_pending.cents(), 4 * max);
    }

    #[test]
    fn test_summary_after_payments() {
        let mut ledger = scenario();
        let a1 = AccountId::from("A1");

        ledger
            .record_payment(&ExpenseId::from("f1"), ym(2026, 1), None)
            .unwrap();
        let summary = account_summary(&ledger, &a1).unwrap();
        assert_eq!(summary.total_paid, money("50.00"));
        assert_eq!(summary.total_pending, money("20.00"));
        assert_eq!(summary.balance, money("950.00"));

        ledger.set_expense_paid(&ExpenseId::from("e1"), true).unwrap();
        let summary = account_summary(&ledger, &a1).unwrap();
        assert_eq!(summary.total_paid, money("70.00"));
        assert_eq!(summary.total_pending, Money::zero());
        assert_eq!(summary.balance, money("930.00"));
    }

    #[test]
    fn test_summary_unknown_account() {
        let ledger = scenario();
        let err = account_summary(&ledger, &AccountId::from("ZZ")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_summary_without_opening_balance() {
        let mut ledger = scenario();
        ledger.add_account(Account::new("B2", "Savings")).unwrap();
        ledger
            .add_expense(Expense::new("e2", "B2", "Gift", money("15.00"), date(2026, 2, 1)).paid())
            .unwrap();

        let summary = account_summary(&ledger, &AccountId::from("B2")).unwrap();
        assert_eq!(summary.opening_balance, Money::zero());
        assert_eq!(summary.balance, money("-15.00"));
        assert_eq!(summary.total_paid, money("15.00"));
    }

    #[test]
    fn test_fixed_total_ignores_ad_hoc_expenses() {
        let mut ledger = scenario();
        let before = total_fixed_for_month(&ledger, ym(2026, 1));

        ledger
            .add_expense(Expense::new("e2", "A1", "Taxi", money("99.99"), date(2026, 1, 20)))
            .unwrap();

        assert_eq!(total_fixed_for_month(&ledger, ym(2026, 1)), before);
        assert_eq!(total_expenses_for_month(&ledger, ym(2026, 1)), money("119.99"));
    }

    #[test]
    fn test_fixed_total_follows_subscription_window() {
        let mut ledger = scenario();
        ledger
            .add_subscription(Subscription::new("s1", "A1", "Streaming", money("16.00"), date(2026, 3, 1)))
            .unwrap();

        assert_eq!(total_fixed_for_month(&ledger, ym(2026, 2)), money("50.00"));
        assert_eq!(total_fixed_for_month(&ledger, ym(2026, 3)), money("66.00"));
        assert_eq!(total_fixed_for_month(&ledger, ym(2026, 12)), money("66.00"));
    }

    #[test]
    fn test_months_outside_year_are_zero() {
        let ledger = scenario();
        let a1 = AccountId::from("A1");

        assert_eq!(total_fixed_for_month(&ledger, ym(2025, 12)), Money::zero());
        assert_eq!(total_expenses_for_month(&ledger, ym(2027, 1)), Money::zero());
        assert_eq!(pending_for_account(&ledger, &a1, ym(2027, 1)), Money::zero());
    }

    #[test]
    fn test_out_of_year_expense_excluded() {
        let mut ledger = scenario();
        ledger
            .add_expense(Expense::new("old", "A1", "Last year", money("5.00"), date(2025, 12, 31)))
            .unwrap();

        assert_eq!(recorded_months(&ledger), vec![ym(2026, 1)]);
        let summary = account_summary(&ledger, &AccountId::from("A1")).unwrap();
        assert_eq!(summary.total_pending, money("70.00"));
    }

    #[test]
    fn test_recorded_months_include_payment_months() {
        let mut ledger = scenario();
        ledger
            .record_payment(&ExpenseId::from("f1"), ym(2026, 4), None)
            .unwrap();

        assert_eq!(recorded_months(&ledger), vec![ym(2026, 1), ym(2026, 4)]);
    }

    #[test]
    fn test_pending_for_month_spans_accounts() {
        let mut ledger = scenario();
        ledger.add_account(Account::new("B2", "Savings")).unwrap();
        ledger
            .add_fixed_expense(FixedExpense::new("f2", "B2", "Gym", money("30.00"), 12))
            .unwrap();

        assert_eq!(pending_for_month(&ledger, ym(2026, 1)), money("100.00"));
        assert_eq!(pending_for_month(&ledger, ym(2026, 2)), money("80.00"));
    }

    #[test]
    fn test_all_account_summaries() {
        let mut ledger = scenario();
        ledger.add_account(Account::new("B2", "Savings")).unwrap();

        let summaries = all_account_summaries(&ledger).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].account_id, AccountId::from("A1"));
        assert_eq!(summaries[1].total_pending, Money::zero());
    }
}
