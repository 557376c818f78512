//! Month view, account summaries and the year overview

use crate::calculator::{all_account_summaries, year_overview};
use crate::config::Settings;
use crate::display::account::format_summary_table;
use crate::display::report::{format_month_view, format_year_overview};
use crate::error::{BudgetError, BudgetResult};

use super::session::Session;
use super::{default_month, parse_month};

/// Show everything due in a month
pub fn handle_month(
    session: &mut Session,
    settings: &Settings,
    month: Option<&str>,
) -> BudgetResult<()> {
    let month = match month {
        Some(m) => parse_month(m)?,
        None => default_month(session.year()),
    };

    let ledger = session.ledger()?;
    if !ledger.covers_month(month) {
        return Err(BudgetError::Validation(format!(
            "Month {} is outside the {} ledger",
            month,
            ledger.year()
        )));
    }

    print!(
        "{}",
        format_month_view(ledger, month, settings.control_day, &settings.currency_symbol)
    );
    Ok(())
}

/// Show per-account paid, pending and balance totals
pub fn handle_summary(session: &mut Session, settings: &Settings) -> BudgetResult<()> {
    let year = session.year();
    let ledger = session.ledger()?;
    let summaries = all_account_summaries(ledger)?;

    println!("Account summary {}", year);
    println!();
    print!("{}", format_summary_table(&summaries, &settings.currency_symbol));
    Ok(())
}

/// Show the twelve-month overview
pub fn handle_overview(session: &mut Session, settings: &Settings) -> BudgetResult<()> {
    let ledger = session.ledger()?;
    print!(
        "{}",
        format_year_overview(&year_overview(ledger), &settings.currency_symbol)
    );
    Ok(())
}
