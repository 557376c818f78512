//! Report formatting for terminal output
//!
//! Month view and year overview, plus the small text helpers the other
//! display modules share.

use crate::calculator::{
    month_items, month_statistics, pending_for_account, total_expenses_for_month,
    total_fixed_for_month, YearOverview,
};
use crate::models::{Ledger, Money, YearMonth};

/// Truncate a string to a maximum length (in characters) with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Format a header line centred in `width`
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

const MONTH_WIDTH: usize = 84;

/// Everything due in a month, its totals, and what each account still owes
pub fn format_month_view(
    ledger: &Ledger,
    month: YearMonth,
    control_day: u32,
    symbol: &str,
) -> String {
    let items = month_items(ledger, month);
    let mut output = String::new();

    output.push_str(&format_header(&format!("Month {}", month), MONTH_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Control date: {}\n",
        month.day_clamped(control_day)
    ));
    output.push_str(&double_separator(MONTH_WIDTH));
    output.push('\n');

    if items.is_empty() {
        output.push_str("Nothing due this month.\n");
    } else {
        output.push_str(&format!(
            "{:2} {:10} {:24} {:20} {:12} {:>12}\n",
            "", "Due", "Label", "Account", "Kind", "Amount"
        ));
        output.push_str(&separator(MONTH_WIDTH));
        output.push('\n');

        for item in &items {
            let account = ledger
                .account(&item.account_id)
                .map(|a| a.name.as_str())
                .unwrap_or(item.account_id.as_str());
            output.push_str(&format!(
                "{:2} {:10} {:24} {:20} {:12} {:>12}\n",
                if item.paid { "✓" } else { " " },
                item.due_date.to_string(),
                truncate(&item.label, 24),
                truncate(account, 20),
                item.kind.to_string(),
                item.amount.format_with_symbol(symbol),
            ));
        }
    }

    let fixed = total_fixed_for_month(ledger, month);
    let ad_hoc = total_expenses_for_month(ledger, month);
    let pending: Money = items.iter().filter(|i| !i.paid).map(|i| i.amount).sum();

    output.push_str(&separator(MONTH_WIDTH));
    output.push('\n');
    output.push_str(&format!("Fixed + subscriptions: {:>12}\n", fixed.format_with_symbol(symbol)));
    output.push_str(&format!("Expenses:              {:>12}\n", ad_hoc.format_with_symbol(symbol)));
    output.push_str(&format!(
        "Total:                 {:>12}\n",
        (fixed + ad_hoc).format_with_symbol(symbol)
    ));
    output.push_str(&format!("Pending:               {:>12}\n", pending.format_with_symbol(symbol)));

    let stats = month_statistics(ledger, month);
    if stats.count > 0 {
        output.push_str(&format!(
            "Items: {}  average {}  largest {}  smallest {}\n",
            stats.count,
            stats.average.format_with_symbol(symbol),
            stats.max.format_with_symbol(symbol),
            stats.min.format_with_symbol(symbol),
        ));
    }

    let owing: Vec<(String, Money)> = ledger
        .accounts()
        .map(|a| (a.name.clone(), pending_for_account(ledger, &a.id, month)))
        .filter(|(_, amount)| !amount.is_zero())
        .collect();

    if !owing.is_empty() {
        output.push('\n');
        output.push_str("Pending by account:\n");
        for (name, amount) in owing {
            output.push_str(&format!(
                "  {:<24} {:>12}\n",
                truncate(&name, 24),
                amount.format_with_symbol(symbol)
            ));
        }
    }

    output
}

/// Twelve-month table of fixed, ad-hoc, paid and pending totals
pub fn format_year_overview(overview: &YearOverview, symbol: &str) -> String {
    let mut output = String::new();
    let width = 7 + 5 * 14;

    output.push_str(&format_header(&format!("Year {}", overview.year), width));
    output.push('\n');
    output.push_str(&double_separator(width));
    output.push('\n');
    output.push_str(&format!(
        "{:7}{:>14}{:>14}{:>14}{:>14}{:>14}\n",
        "Month", "Fixed", "Expenses", "Total", "Paid", "Pending"
    ));
    output.push_str(&separator(width));
    output.push('\n');

    let row = |label: String, fixed: Money, ad_hoc: Money, paid: Money, pending: Money| {
        format!(
            "{:7}{:>14}{:>14}{:>14}{:>14}{:>14}\n",
            label,
            fixed.format_with_symbol(symbol),
            ad_hoc.format_with_symbol(symbol),
            (fixed + ad_hoc).format_with_symbol(symbol),
            paid.format_with_symbol(symbol),
            pending.format_with_symbol(symbol),
        )
    };

    for m in &overview.months {
        output.push_str(&row(m.month.to_string(), m.fixed, m.ad_hoc, m.paid, m.pending));
    }

    output.push_str(&separator(width));
    output.push('\n');
    output.push_str(&row(
        "TOTAL".to_string(),
        overview.total_fixed(),
        overview.total_ad_hoc(),
        overview.total_paid(),
        overview.total_pending(),
    ));

    output
}
