//! Subscription CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::format_subscription_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseId, Subscription};

use super::session::Session;
use super::{parse_amount, parse_date, resolve_account};

/// Subscription subcommands
#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// Add a subscription
    Add {
        /// Label (e.g., "Video streaming")
        label: String,
        /// Amount per charge
        amount: String,
        /// Account name or ID it is charged to
        #[arg(short, long)]
        account: String,
        /// First day of the active window (YYYY-MM-DD, default Jan 1st)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day of the active window (YYYY-MM-DD, open when omitted)
        #[arg(short, long)]
        end: Option<String>,
        /// Day of month it is due (1-31)
        #[arg(short = 'd', long, default_value = "1")]
        due_day: u32,
        /// Charge once a year in this month (1-12) instead of monthly
        #[arg(long, value_name = "MONTH")]
        annual: Option<u32>,
        /// Subscription id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List subscriptions
    List,
    /// Edit a subscription that has no payments yet
    Edit {
        /// Subscription ID
        id: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
        /// New last day of the active window (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short = 'd', long)]
        due_day: Option<u32>,
    },
    /// Remove a subscription that has no payments
    Remove {
        /// Subscription ID
        id: String,
    },
}

/// Handle a subscription command
pub fn handle_subscription_command(
    session: &mut Session,
    settings: &Settings,
    cmd: SubscriptionCommands,
) -> BudgetResult<()> {
    match cmd {
        SubscriptionCommands::Add {
            label,
            amount,
            account,
            start,
            end,
            due_day,
            annual,
            id,
        } => {
            let amount = parse_amount(&amount)?;
            let start = match start {
                Some(s) => parse_date(&s)?,
                None => session.year_start()?,
            };
            let end = end.as_deref().map(parse_date).transpose()?;
            let id = id.map(ExpenseId::from).unwrap_or_else(ExpenseId::generate);

            let subscription = session.commit(|ledger| {
                let account_id = resolve_account(ledger, &account)?;
                let mut subscription = Subscription::new(id, account_id, label, amount, start)
                    .with_due_day(due_day);
                subscription.end_date = end;
                if let Some(month) = annual {
                    subscription = subscription.annual(month);
                }
                ledger.add_subscription(subscription.clone())?;
                Ok(subscription)
            })?;

            println!("Added subscription: {}", subscription.label);
            println!(
                "  Amount: {} ({})",
                subscription
                    .amount
                    .format_with_symbol(&settings.currency_symbol),
                subscription.billing
            );
            println!("  ID: {}", subscription.id);
        }

        SubscriptionCommands::List => {
            let ledger = session.ledger()?;
            print!(
                "{}",
                format_subscription_list(ledger, ledger.subscriptions(), &settings.currency_symbol)
            );
        }

        SubscriptionCommands::Edit {
            id,
            label,
            amount,
            account,
            end,
            due_day,
        } => {
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let end = end.as_deref().map(parse_date).transpose()?;
            let id = ExpenseId::from(id);

            let updated = session.commit(|ledger| {
                let mut edited = ledger
                    .subscription(&id)
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
                if end.is_some() {
                    edited.end_date = end;
                }
                if let Some(day) = due_day {
                    edited.due_day = day;
                }

                ledger.update_subscription(edited.clone())?;
                Ok(edited)
            })?;

            println!("Updated subscription: {}", updated.label);
        }

        SubscriptionCommands::Remove { id } => {
            let removed =
                session.commit(|ledger| ledger.remove_subscription(&ExpenseId::from(id)))?;
            println!("Removed subscription: {} ({})", removed.label, removed.id);
        }
    }

    Ok(())
}
