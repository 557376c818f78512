//! Fixed expense CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::format_fixed_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseId, FixedExpense};

use super::session::Session;
use super::{parse_amount, resolve_account};

/// Fixed expense subcommands
#[derive(Subcommand)]
pub enum FixedCommands {
    /// Add a fixed monthly expense
    Add {
        /// Label (e.g., "Mortgage")
        label: String,
        /// Monthly amount
        amount: String,
        /// Account name or ID it is charged to
        #[arg(short, long)]
        account: String,
        /// Day of month it is due (1-31)
        #[arg(short = 'd', long, default_value = "1")]
        due_day: u32,
        /// Expense id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List fixed expenses
    List,
    /// Edit a fixed expense that has no payments yet
    Edit {
        /// Expense ID
        id: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        #[arg(short = 'd', long)]
        due_day: Option<u32>,
    },
    /// Remove a fixed expense that has no payments
    Remove {
        /// Expense ID
        id: String,
    },
}

/// Handle a fixed expense command
pub fn handle_fixed_command(
    session: &mut Session,
    settings: &Settings,
    cmd: FixedCommands,
) -> BudgetResult<()> {
    match cmd {
        FixedCommands::Add {
            label,
            amount,
            account,
            due_day,
            id,
        } => {
            let amount = parse_amount(&amount)?;
            let id = id.map(ExpenseId::from).unwrap_or_else(ExpenseId::generate);

            let fixed = session.commit(|ledger| {
                let account_id = resolve_account(ledger, &account)?;
                let fixed = FixedExpense::new(id, account_id, label, amount, due_day);
                ledger.add_fixed_expense(fixed.clone())?;
                Ok(fixed)
            })?;

            println!("Added fixed expense: {}", fixed.label);
            println!(
                "  Amount: {} on day {}",
                fixed.amount.format_with_symbol(&settings.currency_symbol),
                fixed.due_day
            );
            println!("  ID: {}", fixed.id);
        }

        FixedCommands::List => {
            let ledger = session.ledger()?;
            print!(
                "{}",
                format_fixed_list(ledger, ledger.fixed_expenses(), &settings.currency_symbol)
            );
        }

        FixedCommands::Edit {
            id,
            label,
            amount,
            account,
            due_day,
        } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let id = ExpenseId::from(id);

            let updated = session.commit(|ledger| {
                let mut edited = ledger
                    .fixed_expense(&id)
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
                if let Some(day) = due_day {
                    edited.due_day = day;
                }

                ledger.update_fixed_expense(edited.clone())?;
                Ok(edited)
            })?;

            println!("Updated fixed expense: {}", updated.label);
        }

        FixedCommands::Remove { id } => {
            let removed = session.commit(|ledger| ledger.remove_fixed_expense(&ExpenseId::from(id)))?;
            println!("Removed fixed expense: {} ({})", removed.label, removed.id);
        }
    }

    Ok(())
}
