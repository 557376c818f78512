//! Core data models for paycontrol
//!
//! This module contains the data structures of the household budget domain:
//! accounts, fixed expenses, subscriptions, ad-hoc expenses, payment records,
//! and the per-year ledger that owns them.

pub mod account;
pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod payment;
pub mod period;
pub mod recurring;

pub use account::Account;
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{AccountId, ExpenseId};
pub use ledger::{AccountReferences, ExpenseKind, Ledger};
pub use money::Money;
pub use payment::PaymentRecord;
pub use period::YearMonth;
pub use recurring::{BillingCycle, FixedExpense, Subscription};
