//! Calculations over a ledger
//!
//! Everything here is a pure function of a borrowed [`Ledger`](crate::models::Ledger):
//! monthly totals, pending amounts, account summaries, month views and the
//! year overview.

pub mod month;
pub mod totals;

pub use month::{
    month_items, month_statistics, year_overview, MonthOverview, MonthStatistics, MonthlyItem,
    YearOverview,
};
pub use totals::{
    account_summary, all_account_summaries, pending_for_account, pending_for_month,
    recorded_months, total_expenses_for_month, total_fixed_for_month, AccountSummary,
};
