//! Export module for paycontrol
//!
//! Provides ledger export in multiple formats:
//! - JSON: machine-readable full ledger export, re-importable
//! - YAML: human-readable full ledger export, re-importable
//! - CSV: a month view (spreadsheet-compatible)
//! - Text: the list of unpaid items for a month

pub mod csv;
pub mod json;
pub mod pending;
pub mod yaml;

use std::path::Path;

use crate::error::{BudgetError, BudgetResult};

pub use self::csv::export_month_csv;
pub use json::{export_ledger_json, import_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use pending::{export_pending, pending_file_name, render_pending};
pub use yaml::{export_ledger_yaml, import_ledger_yaml};

/// Read a JSON or YAML export from disk, chosen by file extension
pub fn import_ledger_file(path: &Path) -> BudgetResult<LedgerExport> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| BudgetError::Import(format!("Failed to read {}: {}", path.display(), e)))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => import_ledger_yaml(&contents),
        _ => import_ledger_json(&contents),
    }
}
