//! CSV Export functionality
//!
//! Exports a month view (every item due in the month) to CSV.

use crate::calculator::month_items;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Ledger, YearMonth};
use std::io::Write;

const HEADER: [&str; 7] = ["Due Date", "ID", "Account", "Label", "Kind", "Amount", "Paid"];

/// Export the items due in `month` to CSV
pub fn export_month_csv<W: Write>(
    ledger: &Ledger,
    month: YearMonth,
    writer: W,
) -> BudgetResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(HEADER)
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    for item in month_items(ledger, month) {
        let account_name = ledger
            .account(&item.account_id)
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown");

        csv_writer
            .write_record([
                item.due_date.to_string(),
                item.expense_id.to_string(),
                account_name.to_string(),
                item.label.clone(),
                item.kind.to_string(),
                item.amount.to_string(),
                if item.paid { "yes" } else { "no" }.to_string(),
            ])
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}
