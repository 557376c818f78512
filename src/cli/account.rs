//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::calculator::{account_summary, all_account_summaries};
use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list, format_summary_table};
use crate::error::BudgetResult;
use crate::models::{Account, AccountId};

use super::session::Session;
use super::{parse_amount, resolve_account};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long)]
        balance: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all accounts
    List {
        /// Include paid, pending and balance columns
        #[arg(short, long)]
        balances: bool,
    },
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Edit an account
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New opening balance
        #[arg(short, long)]
        balance: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove an account nothing is charged to
    Remove {
        /// Account name or ID
        account: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    session: &mut Session,
    settings: &Settings,
    cmd: AccountCommands,
) -> BudgetResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            name,
            id,
            balance,
            notes,
        } => {
            let opening = balance.as_deref().map(parse_amount).transpose()?;
            let id = id.map(AccountId::from).unwrap_or_else(AccountId::generate);

            let mut account = Account::new(id, name);
            account.opening_balance = opening;
            account.notes = notes.unwrap_or_default();

            session.commit(|ledger| ledger.add_account(account.clone()))?;

            println!("Created account: {}", account.name);
            if let Some(opening) = account.opening_balance {
                println!("  Opening Balance: {}", opening.format_with_symbol(symbol));
            }
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { balances } => {
            let ledger = session.ledger()?;
            if balances {
                let summaries = all_account_summaries(ledger)?;
                print!("{}", format_summary_table(&summaries, symbol));
            } else {
                let accounts: Vec<&Account> = ledger.accounts().collect();
                print!("{}", format_account_list(&accounts, symbol));
            }
        }

        AccountCommands::Show { account } => {
            let ledger = session.ledger()?;
            let id = resolve_account(ledger, &account)?;
            let summary = account_summary(ledger, &id)?;
            let found = ledger
                .account(&id)
                .ok_or_else(|| crate::error::BudgetError::account_not_found(&account))?;

            print!(
                "{}",
                format_account_details(found, &summary, ledger.references_to(&id), symbol)
            );
        }

        AccountCommands::Edit {
            account,
            name,
            balance,
            notes,
        } => {
            if name.is_none() && balance.is_none() && notes.is_none() {
                println!("No changes specified. Use --name, --balance or --notes.");
                return Ok(());
            }
            let opening = balance.as_deref().map(parse_amount).transpose()?;

            let updated = session.commit(|ledger| {
                let id = resolve_account(ledger, &account)?;
                let mut edited = ledger
                    .account(&id)
                    .cloned()
                    .ok_or_else(|| crate::error::BudgetError::account_not_found(&account))?;

                if let Some(name) = name {
                    edited.name = name;
                }
                if opening.is_some() {
                    edited.opening_balance = opening;
                }
                if let Some(notes) = notes {
                    edited.notes = notes;
                }

                ledger.update_account(edited.clone())?;
                Ok(edited)
            })?;

            println!("Updated account: {}", updated.name);
        }

        AccountCommands::Remove { account } => {
            let removed = session.commit(|ledger| {
                let id = resolve_account(ledger, &account)?;
                ledger.remove_account(&id)
            })?;
            println!("Removed account: {} ({})", removed.name, removed.id);
        }
    }

    Ok(())
}
