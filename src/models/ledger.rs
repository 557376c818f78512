//! Ledger model
//!
//! The in-memory owner of every account, recurring item, expense and payment
//! record for one budget year. All mutations validate first and leave the
//! ledger untouched when they fail.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::config::defaults::LedgerDefaults;
use crate::error::{BudgetError, BudgetResult};

use super::account::Account;
use super::expense::Expense;
use super::ids::{AccountId, ExpenseId};
use super::payment::PaymentRecord;
use super::period::YearMonth;
use super::recurring::{FixedExpense, Subscription};

/// All budget data for a single year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ledger {
    year: i32,
    accounts: BTreeMap<AccountId, Account>,
    fixed_expenses: Vec<FixedExpense>,
    subscriptions: Vec<Subscription>,
    expenses: Vec<Expense>,
    #[serde(default)]
    payments: Vec<PaymentRecord>,
}

/// What kind of entity an expense id points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseKind {
    Fixed,
    Subscription,
    AdHoc,
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Subscription => write!(f, "Subscription"),
            Self::AdHoc => write!(f, "Expense"),
        }
    }
}

/// Counts of entities referencing one account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountReferences {
    pub fixed_expenses: usize,
    pub subscriptions: usize,
    pub expenses: usize,
}

impl AccountReferences {
    pub fn total(&self) -> usize {
        self.fixed_expenses + self.subscriptions + self.expenses
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for AccountReferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.fixed_expenses > 0 {
            parts.push(format!("{} fixed expense(s)", self.fixed_expenses));
        }
        if self.subscriptions > 0 {
            parts.push(format!("{} subscription(s)", self.subscriptions));
        }
        if self.expenses > 0 {
            parts.push(format!("{} expense(s)", self.expenses));
        }
        if parts.is_empty() {
            write!(f, "nothing")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

impl Ledger {
    /// Create an empty ledger for `year`
    pub fn new(year: i32) -> Self {
        Self {
            year,
            accounts: BTreeMap::new(),
            fixed_expenses: Vec::new(),
            subscriptions: Vec::new(),
            expenses: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Create a ledger for `year` populated from household templates
    pub fn seeded(year: i32, defaults: &LedgerDefaults) -> BudgetResult<Self> {
        defaults.seed_ledger(year)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// True if `month` belongs to this ledger's year
    pub fn covers_month(&self, month: YearMonth) -> bool {
        month.year() == self.year
    }

    /// True if `date` belongs to this ledger's year
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.covers_month(YearMonth::from_date(date))
    }

    // ----- read access -----

    /// Accounts in id order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn has_account(&self, id: &AccountId) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn fixed_expenses(&self) -> &[FixedExpense] {
        &self.fixed_expenses
    }

    pub fn fixed_expense(&self, id: &ExpenseId) -> Option<&FixedExpense> {
        self.fixed_expenses.iter().find(|f| &f.id == id)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn subscription(&self, id: &ExpenseId) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| &s.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// Which kind of entity owns `id`, if any
    pub fn expense_kind(&self, id: &ExpenseId) -> Option<ExpenseKind> {
        if self.fixed_expense(id).is_some() {
            Some(ExpenseKind::Fixed)
        } else if self.subscription(id).is_some() {
            Some(ExpenseKind::Subscription)
        } else if self.expense(id).is_some() {
            Some(ExpenseKind::AdHoc)
        } else {
            None
        }
    }

    /// Count entities charged to `account_id`
    pub fn references_to(&self, account_id: &AccountId) -> AccountReferences {
        AccountReferences {
            fixed_expenses: self
                .fixed_expenses
                .iter()
                .filter(|f| &f.account_id == account_id)
                .count(),
            subscriptions: self
                .subscriptions
                .iter()
                .filter(|s| &s.account_id == account_id)
                .count(),
            expenses: self
                .expenses
                .iter()
                .filter(|e| &e.account_id == account_id)
                .count(),
        }
    }

    /// Number of payment records held for a recurring item
    pub fn payment_count(&self, expense_id: &ExpenseId) -> usize {
        self.payments
            .iter()
            .filter(|p| &p.expense_id == expense_id)
            .count()
    }

    /// Whether a recurring item has a payment record for `month`
    pub fn is_recurring_paid(&self, expense_id: &ExpenseId, month: YearMonth) -> bool {
        self.payments.iter().any(|p| p.covers(expense_id, month))
    }

    // ----- accounts -----

    /// Add an account; its id must be unused
    pub fn add_account(&mut self, account: Account) -> BudgetResult<()> {
        account
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if self.accounts.contains_key(&account.id) {
            return Err(BudgetError::Validation(format!(
                "Account id already exists: {}",
                account.id
            )));
        }

        self.accounts.insert(account.id.clone(), account);
        Ok(())
    }

    /// Replace an existing account's fields (the id cannot change)
    pub fn update_account(&mut self, account: Account) -> BudgetResult<()> {
        account
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let slot = self
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| BudgetError::account_not_found(account.id.as_str()))?;
        *slot = account;
        Ok(())
    }

    /// Remove an account that nothing references
    ///
    /// There is no cascade: dependents must be reassigned or removed first.
    pub fn remove_account(&mut self, id: &AccountId) -> BudgetResult<Account> {
        if !self.accounts.contains_key(id) {
            return Err(BudgetError::account_not_found(id.as_str()));
        }

        let references = self.references_to(id);
        if !references.is_empty() {
            return Err(BudgetError::ReferentialIntegrity {
                entity: "Account",
                id: id.to_string(),
                dependents: references.to_string(),
            });
        }

        self.accounts
            .remove(id)
            .ok_or_else(|| BudgetError::account_not_found(id.as_str()))
    }

    // ----- fixed expenses -----

    pub fn add_fixed_expense(&mut self, fixed: FixedExpense) -> BudgetResult<()> {
        fixed
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&fixed.account_id)?;
        self.require_unused_id(&fixed.id)?;

        self.fixed_expenses.push(fixed);
        Ok(())
    }

    /// Replace a fixed expense; rejected once any month has been paid
    pub fn update_fixed_expense(&mut self, fixed: FixedExpense) -> BudgetResult<()> {
        let index = self
            .fixed_expenses
            .iter()
            .position(|f| f.id == fixed.id)
            .ok_or_else(|| BudgetError::expense_not_found(fixed.id.as_str()))?;
        self.require_unlocked(&fixed.id)?;
        fixed
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&fixed.account_id)?;

        self.fixed_expenses[index] = fixed;
        Ok(())
    }

    pub fn remove_fixed_expense(&mut self, id: &ExpenseId) -> BudgetResult<FixedExpense> {
        let index = self
            .fixed_expenses
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(id.as_str()))?;
        self.require_no_payments("Fixed expense", id)?;

        Ok(self.fixed_expenses.remove(index))
    }

    // ----- subscriptions -----

    pub fn add_subscription(&mut self, subscription: Subscription) -> BudgetResult<()> {
        subscription
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&subscription.account_id)?;
        self.require_unused_id(&subscription.id)?;

        self.subscriptions.push(subscription);
        Ok(())
    }

    /// Replace a subscription; rejected once any month has been paid
    pub fn update_subscription(&mut self, subscription: Subscription) -> BudgetResult<()> {
        let index = self
            .subscriptions
            .iter()
            .position(|s| s.id == subscription.id)
            .ok_or_else(|| BudgetError::expense_not_found(subscription.id.as_str()))?;
        self.require_unlocked(&subscription.id)?;
        subscription
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&subscription.account_id)?;

        self.subscriptions[index] = subscription;
        Ok(())
    }

    pub fn remove_subscription(&mut self, id: &ExpenseId) -> BudgetResult<Subscription> {
        let index = self
            .subscriptions
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(id.as_str()))?;
        self.require_no_payments("Subscription", id)?;

        Ok(self.subscriptions.remove(index))
    }

    // ----- ad-hoc expenses -----

    /// Add a one-off expense
    ///
    /// Fails with a validation error if the account is unknown, the amount
    /// is negative, or the id is already taken.
    pub fn add_expense(&mut self, expense: Expense) -> BudgetResult<()> {
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&expense.account_id)?;
        self.require_unused_id(&expense.id)?;

        self.expenses.push(expense);
        Ok(())
    }

    pub fn update_expense(&mut self, expense: Expense) -> BudgetResult<()> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == expense.id)
            .ok_or_else(|| BudgetError::expense_not_found(expense.id.as_str()))?;
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_account(&expense.account_id)?;

        self.expenses[index] = expense;
        Ok(())
    }

    pub fn remove_expense(&mut self, id: &ExpenseId) -> BudgetResult<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(id.as_str()))?;

        Ok(self.expenses.remove(index))
    }

    /// Flip the paid flag of a one-off expense
    pub fn set_expense_paid(&mut self, id: &ExpenseId, paid: bool) -> BudgetResult<()> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| BudgetError::expense_not_found(id.as_str()))?;
        expense.paid = paid;
        Ok(())
    }

    // ----- payment records -----

    /// Record that a fixed expense or subscription was paid for `month`
    pub fn record_payment(
        &mut self,
        expense_id: &ExpenseId,
        month: YearMonth,
        paid_on: Option<NaiveDate>,
    ) -> BudgetResult<()> {
        let mut record = PaymentRecord::new(expense_id.clone(), month);
        record.paid_on = paid_on;
        self.check_payment(&record)?;

        if self.is_recurring_paid(expense_id, month) {
            return Err(BudgetError::Validation(format!(
                "{} is already paid for {}",
                expense_id, month
            )));
        }

        self.payments.push(record);
        Ok(())
    }

    /// Remove the payment record for (expense, month); returns whether one existed
    pub fn clear_payment(&mut self, expense_id: &ExpenseId, month: YearMonth) -> BudgetResult<bool> {
        match self.expense_kind(expense_id) {
            Some(ExpenseKind::Fixed) | Some(ExpenseKind::Subscription) => {}
            Some(ExpenseKind::AdHoc) => {
                return Err(BudgetError::Validation(format!(
                    "{} is a one-off expense; use its paid flag instead",
                    expense_id
                )))
            }
            None => return Err(BudgetError::expense_not_found(expense_id.as_str())),
        }

        let before = self.payments.len();
        self.payments.retain(|p| !p.covers(expense_id, month));
        Ok(self.payments.len() != before)
    }

    // ----- whole-ledger validation -----

    /// Check every invariant of the ledger
    ///
    /// Mutators keep these invariants on their own; this is for documents
    /// arriving from disk or from an import.
    pub fn validate(&self) -> BudgetResult<()> {
        for (key, account) in &self.accounts {
            account
                .validate()
                .map_err(|e| BudgetError::Validation(format!("Account {}: {}", key, e)))?;
            if key != &account.id {
                return Err(BudgetError::Validation(format!(
                    "Account stored under '{}' has id '{}'",
                    key, account.id
                )));
            }
        }

        let mut seen: HashSet<&ExpenseId> = HashSet::new();

        for fixed in &self.fixed_expenses {
            fixed
                .validate()
                .map_err(|e| BudgetError::Validation(format!("Fixed expense {}: {}", fixed.id, e)))?;
            self.require_account(&fixed.account_id)?;
            if !seen.insert(&fixed.id) {
                return Err(duplicate_id(&fixed.id));
            }
        }

        for sub in &self.subscriptions {
            sub.validate()
                .map_err(|e| BudgetError::Validation(format!("Subscription {}: {}", sub.id, e)))?;
            self.require_account(&sub.account_id)?;
            if !seen.insert(&sub.id) {
                return Err(duplicate_id(&sub.id));
            }
        }

        for expense in &self.expenses {
            expense
                .validate()
                .map_err(|e| BudgetError::Validation(format!("Expense {}: {}", expense.id, e)))?;
            self.require_account(&expense.account_id)?;
            if !seen.insert(&expense.id) {
                return Err(duplicate_id(&expense.id));
            }
        }

        let mut paid: HashSet<(&ExpenseId, YearMonth)> = HashSet::new();
        for record in &self.payments {
            self.check_payment(record)?;
            if !paid.insert((&record.expense_id, record.month)) {
                return Err(BudgetError::Validation(format!(
                    "Duplicate payment record for {} in {}",
                    record.expense_id, record.month
                )));
            }
        }

        Ok(())
    }

    // ----- helpers -----

    fn require_account(&self, id: &AccountId) -> BudgetResult<()> {
        if self.accounts.contains_key(id) {
            Ok(())
        } else {
            Err(BudgetError::Validation(format!("Unknown account: {}", id)))
        }
    }

    fn require_unused_id(&self, id: &ExpenseId) -> BudgetResult<()> {
        if self.expense_kind(id).is_some() {
            Err(duplicate_id(id))
        } else {
            Ok(())
        }
    }

    fn require_unlocked(&self, id: &ExpenseId) -> BudgetResult<()> {
        let count = self.payment_count(id);
        if count > 0 {
            return Err(BudgetError::Validation(format!(
                "{} has {} payment record(s) and can no longer be edited",
                id, count
            )));
        }
        Ok(())
    }

    fn require_no_payments(&self, entity: &'static str, id: &ExpenseId) -> BudgetResult<()> {
        let count = self.payment_count(id);
        if count > 0 {
            return Err(BudgetError::ReferentialIntegrity {
                entity,
                id: id.to_string(),
                dependents: format!("{} payment record(s)", count),
            });
        }
        Ok(())
    }

    fn check_payment(&self, record: &PaymentRecord) -> BudgetResult<()> {
        if !self.covers_month(record.month) {
            return Err(BudgetError::Validation(format!(
                "Payment month {} is outside ledger year {}",
                record.month, self.year
            )));
        }

        match self.expense_kind(&record.expense_id) {
            Some(ExpenseKind::Fixed) => Ok(()),
            Some(ExpenseKind::Subscription) => {
                let active = self
                    .subscription(&record.expense_id)
                    .map(|s| s.is_active_in(record.month))
                    .unwrap_or(false);
                if active {
                    Ok(())
                } else {
                    Err(BudgetError::Validation(format!(
                        "Subscription {} is not active in {}",
                        record.expense_id, record.month
                    )))
                }
            }
            Some(ExpenseKind::AdHoc) => Err(BudgetError::Validation(format!(
                "{} is a one-off expense; use its paid flag instead",
                record.expense_id
            ))),
            None => Err(BudgetError::Validation(format!(
                "Payment record references unknown expense: {}",
                record.expense_id
            ))),
        }
    }
}

fn duplicate_id(id: &ExpenseId) -> BudgetError {
    BudgetError::Validation(format!("Expense id already exists: {}", id))
}
