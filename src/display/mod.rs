//! Display formatting for terminal output
//!
//! Hand-formatted, aligned tables for accounts, expenses, month views and
//! the year overview.

pub mod account;
pub mod expense;
pub mod report;

pub use account::{format_account_details, format_account_list, format_summary_table};
pub use expense::{format_expense_list, format_fixed_list, format_subscription_list};
pub use report::{format_month_view, format_year_overview};
