//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::calculator::AccountSummary;
use crate::models::{Account, AccountReferences, Money};

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[&Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let id_width = column_width(accounts.iter().map(|a| a.id.as_str()), "ID");
    let name_width = column_width(accounts.iter().map(|a| a.name.as_str()), "Name");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<name_width$}  {:>12}  {}\n",
        "ID", "Name", "Opening", "Notes",
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<name_width$}  {:->12}  {:-<10}\n",
        "", "", "", "",
    ));

    for account in accounts {
        let opening = account
            .opening_balance
            .map(|m| m.format_with_symbol(symbol))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:>12}  {}\n",
            account.id, account.name, opening, account.notes,
        ));
    }

    output
}

/// Format per-account balances, paid and pending totals
pub fn format_summary_table(summaries: &[AccountSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = column_width(summaries.iter().map(|s| s.name.as_str()), "Account");
    let line = |name: &str, a: Money, b: Money, c: Money, d: Money| {
        format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>12}\n",
            name,
            a.format_with_symbol(symbol),
            b.format_with_symbol(symbol),
            c.format_with_symbol(symbol),
            d.format_with_symbol(symbol),
        )
    };
    let rule = format!(
        "{:-<name_width$}  {:->12}  {:->12}  {:->12}  {:->12}\n",
        "", "", "", "", "",
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>12}\n",
        "Account", "Opening", "Paid", "Pending", "Balance",
    ));
    output.push_str(&rule);

    for s in summaries {
        output.push_str(&line(
            &s.name,
            s.opening_balance,
            s.total_paid,
            s.total_pending,
            s.balance,
        ));
    }

    output.push_str(&rule);
    output.push_str(&line(
        "TOTAL",
        summaries.iter().map(|s| s.opening_balance).sum(),
        summaries.iter().map(|s| s.total_paid).sum(),
        summaries.iter().map(|s| s.total_pending).sum(),
        summaries.iter().map(|s| s.balance).sum(),
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(
    account: &Account,
    summary: &AccountSummary,
    references: AccountReferences,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  ID:             {}\n", account.id));
    output.push_str(&format!(
        "  Opening:        {}\n",
        summary.opening_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Paid:           {}\n",
        summary.total_paid.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Pending:        {}\n",
        summary.total_pending.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Balance:        {}\n",
        summary.balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Charged items:  {}\n", references));

    if !account.notes.is_empty() {
        output.push_str(&format!("  Notes:          {}\n", account.notes));
    }

    output
}
