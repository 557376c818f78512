//! Default household templates
//!
//! A fresh year starts from these accounts, fixed expenses and subscriptions.
//! They live in `config.json` so a household can tailor them once and get the
//! same starting point every January.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Account, AccountId, BillingCycle, ExpenseId, FixedExpense, Ledger, Money, Subscription,
};

/// A default account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTemplate {
    pub id: AccountId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Money>,
}

/// A default fixed expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTemplate {
    pub id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Money,
    pub due_day: u32,
}

/// A default subscription; its window starts on January 1st of the seeded year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionTemplate {
    pub id: ExpenseId,
    pub account_id: AccountId,
    pub label: String,
    pub amount: Money,
    pub due_day: u32,
    #[serde(default)]
    pub billing: BillingCycle,
}

/// Everything a new year's ledger is seeded with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDefaults {
    #[serde(default)]
    pub accounts: Vec<AccountTemplate>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedTemplate>,
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionTemplate>,
}

impl LedgerDefaults {
    /// No accounts, no templates
    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            fixed_expenses: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Build a ledger for `year` from these templates
    ///
    /// Templates go through the regular ledger mutators, so a template that
    /// breaks an invariant is reported instead of being seeded.
    pub fn seed_ledger(&self, year: i32) -> BudgetResult<Ledger> {
        let mut ledger = Ledger::new(year);
        let year_start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| BudgetError::Config(format!("Invalid year: {}", year)))?;

        for template in &self.accounts {
            let mut account = Account::new(template.id.clone(), template.name.clone());
            account.opening_balance = template.opening_balance;
            ledger
                .add_account(account)
                .map_err(|e| BudgetError::Config(format!("Default account: {}", e)))?;
        }

        for template in &self.fixed_expenses {
            ledger
                .add_fixed_expense(FixedExpense::new(
                    template.id.clone(),
                    template.account_id.clone(),
                    template.label.clone(),
                    template.amount,
                    template.due_day,
                ))
                .map_err(|e| BudgetError::Config(format!("Default fixed expense: {}", e)))?;
        }

        for template in &self.subscriptions {
            let mut subscription = Subscription::new(
                template.id.clone(),
                template.account_id.clone(),
                template.label.clone(),
                template.amount,
                year_start,
            )
            .with_due_day(template.due_day);
            subscription.billing = template.billing;
            ledger
                .add_subscription(subscription)
                .map_err(|e| BudgetError::Config(format!("Default subscription: {}", e)))?;
        }

        Ok(ledger)
    }
}

impl Default for LedgerDefaults {
    /// A household with five bank accounts and its usual monthly bills
    fn default() -> Self {
        let accounts = [
            ("bank-1", "Bank 1 - Partner A"),
            ("bank-2", "Bank 1 - Partner B"),
            ("joint", "Joint Account"),
            ("bank-3", "Bank 2 - Partner A"),
            ("bank-4", "Bank 2 - Partner B"),
        ]
        .into_iter()
        .map(|(id, name)| AccountTemplate {
            id: id.into(),
            name: name.into(),
            opening_balance: None,
        })
        .collect();

        let fixed_expenses = [
            ("mortgage", "Mortgage", 53366, 5, "bank-3"),
            ("home-insurance", "Home insurance", 6600, 10, "bank-3"),
            ("life-insurance", "Life insurance", 5200, 10, "joint"),
            ("car-loan", "Car loan", 25800, 15, "bank-1"),
            ("home-loan", "Home improvement loan", 38500, 15, "joint"),
            ("furniture-a", "Furniture financing A", 20000, 25, "bank-1"),
            ("furniture-b", "Furniture financing B", 20000, 25, "bank-4"),
            ("mobile", "Mobile phone", 1500, 8, "bank-1"),
            ("internet", "Internet and TV", 24000, 8, "bank-2"),
            ("water", "Water", 6000, 18, "joint"),
            ("electricity", "Electricity", 12000, 18, "joint"),
            ("groceries", "Groceries", 80000, 2, "joint"),
            ("english", "English course", 8000, 7, "bank-3"),
            ("karate", "Karate", 5000, 7, "bank-3"),
            ("fuel", "Fuel", 10000, 1, "bank-3"),
        ]
        .into_iter()
        .map(|(id, label, cents, due_day, account)| FixedTemplate {
            id: id.into(),
            account_id: account.into(),
            label: label.into(),
            amount: Money::from_cents(cents),
            due_day,
        })
        .collect();

        let monthly = [
            ("ai-assistant", "AI assistant", 2299, 2),
            ("streaming", "Video streaming", 1600, 2),
            ("cloud-storage", "Cloud storage 2 TB", 999, 8),
            ("console-online", "Console online", 1600, 15),
            ("vpn", "VPN", 1299, 19),
            ("kids-game", "Kids game pass", 1100, 30),
        ]
        .into_iter()
        .map(|(id, label, cents, due_day)| SubscriptionTemplate {
            id: id.into(),
            account_id: "bank-2".into(),
            label: label.into(),
            amount: Money::from_cents(cents),
            due_day,
            billing: BillingCycle::Monthly,
        });

        let annual = [
            ("video-editor", "Video editor (annual)", 1599, 8, 5),
            ("messenger", "Messenger premium (annual)", 3399, 25, 9),
        ]
        .into_iter()
        .map(|(id, label, cents, due_day, month)| SubscriptionTemplate {
            id: id.into(),
            account_id: "bank-2".into(),
            label: label.into(),
            amount: Money::from_cents(cents),
            due_day,
            billing: BillingCycle::Annual { month },
        });

        Self {
            accounts,
            fixed_expenses,
            subscriptions: monthly.chain(annual).collect(),
        }
    }
}
