//! Ad-hoc expense CLI commands
//!
//! One-off expenses carry their own paid flag; recurring items are paid
//! through `pay`/`unpay` instead.

use chrono::{Datelike, Local};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::format_expense_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, ExpenseId};

use super::session::Session;
use super::{parse_amount, parse_date, parse_month, resolve_account};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a one-off expense
    Add {
        /// Label (e.g., "Plumber")
        label: String,
        /// Amount
        amount: String,
        /// Account name or ID it is charged to
        #[arg(short, long)]
        account: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Mark as already paid
        #[arg(long)]
        paid: bool,
        /// Expense id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List expenses
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only this account (name or ID)
        #[arg(short, long)]
        account: Option<String>,
        /// Only unpaid expenses
        #[arg(long)]
        unpaid: bool,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove an expense
    Remove {
        /// Expense ID
        id: String,
    },
    /// Mark an expense as paid
    Paid {
        /// Expense ID
        id: String,
    },
    /// Mark an expense as unpaid
    Unpaid {
        /// Expense ID
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    session: &mut Session,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            label,
            amount,
            account,
            date,
            paid,
            id,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };
            if date.year() != session.year() {
                return Err(BudgetError::Validation(format!(
                    "Date {} is outside the {} ledger; use --year to pick another year",
                    date,
                    session.year()
                )));
            }
            let id = id.map(ExpenseId::from).unwrap_or_else(ExpenseId::generate);

            let expense = session.commit(|ledger| {
                let account_id = resolve_account(ledger, &account)?;
                let mut expense = Expense::new(id, account_id, label, amount, date);
                expense.paid = paid;
                ledger.add_expense(expense.clone())?;
                Ok(expense)
            })?;

            println!("Added expense: {}", expense.label);
            println!("  Amount: {}", expense.amount.format_with_symbol(symbol));
            println!("  Date:   {}", expense.date.format(&settings.date_format));
            println!("  ID:     {}", expense.id);
        }

        ExpenseCommands::List {
            month,
            account,
            unpaid,
        } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let ledger = session.ledger()?;
            let account_id = account
                .as_deref()
                .map(|a| resolve_account(ledger, a))
                .transpose()?;

            let mut expenses: Vec<&Expense> = ledger
                .expenses()
                .iter()
                .filter(|e| month.map_or(true, |m| m.contains(e.date)))
                .filter(|e| account_id.as_ref().map_or(true, |a| &e.account_id == a))
                .filter(|e| !unpaid || !e.paid)
                .collect();
            expenses.sort_by_key(|e| e.date);

            print!("{}", format_expense_list(ledger, &expenses, symbol));
        }

        ExpenseCommands::Edit {
            id,
            label,
            amount,
            account,
            date,
        } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let id = ExpenseId::from(id);

            let updated = session.commit(|ledger| {
                let mut edited = ledger
                    .expense(&id)
                    .cloned()
                    .ok_or_else(|| BudgetError::expense_not_found(id.as_str()))?;

                if let Some(label) = label {
                    edited.label = label;
                }
                if let Some(amount) = amount {
                    edited.amount = amount;
                }
                if let Some(account) = account {
                    edited.account_id = resolve_account(ledger, &account)?;
                }
                if let Some(date) = date {
                    edited.date = date;
                }

                ledger.update_expense(edited.clone())?;
                Ok(edited)
            })?;

            println!("Updated expense: {}", updated.label);
        }

        ExpenseCommands::Remove { id } => {
            let removed = session.commit(|ledger| ledger.remove_expense(&ExpenseId::from(id)))?;
            println!("Removed expense: {} ({})", removed.label, removed.id);
        }

        ExpenseCommands::Paid { id } => {
            let id = ExpenseId::from(id);
            session.commit(|ledger| ledger.set_expense_paid(&id, true))?;
            println!("Marked {} as paid", id);
        }

        ExpenseCommands::Unpaid { id } => {
            let id = ExpenseId::from(id);
            session.commit(|ledger| ledger.set_expense_paid(&id, false))?;
            println!("Marked {} as unpaid", id);
        }
    }

    Ok(())
}
