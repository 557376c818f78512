//! Month views, statistics and the year overview

use chrono::NaiveDate;

use crate::models::{AccountId, ExpenseId, ExpenseKind, Ledger, Money, YearMonth};

use super::totals::ad_hoc_in_year;

/// One amount due in a month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyItem {
    pub expense_id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub kind: ExpenseKind,
    pub amount: Money,
    /// Due day clamped to the month, or the expense date for ad-hoc items
    pub due_date: NaiveDate,
    pub paid: bool,
}

/// Everything due in `month`, sorted by due date then label
///
/// Months outside the ledger year are empty.
pub fn month_items(ledger: &Ledger, month: YearMonth) -> Vec<MonthlyItem> {
    if !ledger.covers_month(month) {
        return Vec::new();
    }

    let fixed = ledger.fixed_expenses().iter().map(|f| MonthlyItem {
        expense_id: f.id.clone(),
        account_id: f.account_id.clone(),
        label: f.label.clone(),
        kind: ExpenseKind::Fixed,
        amount: f.amount,
        due_date: f.due_date(month),
        paid: ledger.is_recurring_paid(&f.id, month),
    });

    let subscriptions = ledger
        .subscriptions()
        .iter()
        .filter(|s| s.is_active_in(month))
        .map(|s| MonthlyItem {
            expense_id: s.id.clone(),
            account_id: s.account_id.clone(),
            label: s.label.clone(),
            kind: ExpenseKind::Subscription,
            amount: s.amount,
            due_date: s.due_date(month),
            paid: ledger.is_recurring_paid(&s.id, month),
        });

    let ad_hoc = ad_hoc_in_year(ledger)
        .filter(|e| month.contains(e.date))
        .map(|e| MonthlyItem {
            expense_id: e.id.clone(),
            account_id: e.account_id.clone(),
            label: e.label.clone(),
            kind: ExpenseKind::AdHoc,
            amount: e.amount,
            due_date: e.date,
            paid: e.paid,
        });

    let mut items: Vec<MonthlyItem> = fixed.chain(subscriptions).chain(ad_hoc).collect();
    items.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.label.cmp(&b.label))
    });
    items
}

/// Count, total, average, largest and smallest amount due in a month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthStatistics {
    pub count: usize,
    pub total: Money,
    /// Rounded half away from zero to the cent
    pub average: Money,
    pub max: Money,
    pub min: Money,
}

/// Statistics over every item due in `month`; all zero when nothing is due
pub fn month_statistics(ledger: &Ledger, month: YearMonth) -> MonthStatistics {
    let amounts: Vec<Money> = month_items(ledger, month)
        .into_iter()
        .map(|item| item.amount)
        .collect();

    let (Some(max), Some(min)) = (amounts.iter().max(), amounts.iter().min()) else {
        return MonthStatistics::default();
    };

    let total: Money = amounts.iter().sum();
    let count = amounts.len();

    MonthStatistics {
        count,
        total,
        average: divide_rounded(total, count as i64),
        max: *max,
        min: *min,
    }
}

fn divide_rounded(total: Money, count: i64) -> Money {
    let cents = total.cents();
    let half = count / 2;
    let rounded = if cents >= 0 {
        (cents + half) / count
    } else {
        (cents - half) / count
    };
    Money::from_cents(rounded)
}

/// Per-month totals for one month of the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOverview {
    pub month: YearMonth,
    /// Fixed expenses plus active subscriptions
    pub fixed: Money,
    pub ad_hoc: Money,
    pub paid: Money,
    pub pending: Money,
}

impl MonthOverview {
    pub fn total(&self) -> Money {
        self.fixed + self.ad_hoc
    }
}

/// Twelve months of totals for a ledger year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOverview {
    pub year: i32,
    pub months: Vec<MonthOverview>,
}

impl YearOverview {
    pub fn total_fixed(&self) -> Money {
        self.months.iter().map(|m| m.fixed).sum()
    }

    pub fn total_ad_hoc(&self) -> Money {
        self.months.iter().map(|m| m.ad_hoc).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.months.iter().map(|m| m.paid).sum()
    }

    pub fn total_pending(&self) -> Money {
        self.months.iter().map(|m| m.pending).sum()
    }

    pub fn grand_total(&self) -> Money {
        self.total_fixed() + self.total_ad_hoc()
    }
}

/// Totals for each month of the ledger year
pub fn year_overview(ledger: &Ledger) -> YearOverview {
    let months = YearMonth::months_of(ledger.year())
        .map(|month| {
            let mut row = MonthOverview {
                month,
                fixed: Money::zero(),
                ad_hoc: Money::zero(),
                paid: Money::zero(),
                pending: Money::zero(),
            };
            for item in month_items(ledger, month) {
                match item.kind {
                    ExpenseKind::AdHoc => row.ad_hoc += item.amount,
                    ExpenseKind::Fixed | ExpenseKind::Subscription => row.fixed += item.amount,
                }
                if item.paid {
                    row.paid += item.amount;
                } else {
                    row.pending += item.amount;
                }
            }
            row
        })
        .collect();

    YearOverview {
        year: ledger.year(),
        months,
    }
}
