//! Plain-text list of what is still unpaid in a month

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::calculator::month_items;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Ledger, Money, YearMonth};

const RULE_WIDTH: usize = 60;

/// File name of the pending list for `month`
pub fn pending_file_name(month: YearMonth) -> String {
    format!("pending_{}.txt", month)
}

/// Render the unpaid items of `month`, one `due | amount | label` line each
pub fn render_pending(ledger: &Ledger, month: YearMonth, currency_symbol: &str) -> String {
    let pending: Vec<_> = month_items(ledger, month)
        .into_iter()
        .filter(|item| !item.paid)
        .collect();
    let total: Money = pending.iter().map(|item| item.amount).sum();

    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![format!("Pending {}", month), rule.clone()];
    lines.extend(pending.iter().map(|item| {
        format!(
            "{} | {} | {}",
            item.due_date,
            item.amount.format_with_symbol(currency_symbol),
            item.label
        )
    }));
    lines.push(rule);
    lines.push(format!("TOTAL: {}", total.format_with_symbol(currency_symbol)));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write the pending list for `month` into `dir`, returning the file path
pub fn export_pending(
    ledger: &Ledger,
    month: YearMonth,
    dir: &Path,
    currency_symbol: &str,
) -> BudgetResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        BudgetError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(pending_file_name(month));
    fs::write(&path, render_pending(ledger, month, currency_symbol))
        .map_err(|e| BudgetError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(%month, path = %path.display(), "pending list exported");
    Ok(path)
}
