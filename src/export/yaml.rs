//! YAML Export functionality
//!
//! Exports a ledger year to YAML for a human-readable backup.

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::LedgerExport;
use crate::models::Ledger;
use std::io::Write;

fn export_err(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Export(e.to_string())
}

/// Export the ledger to YAML format
pub fn export_ledger_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> BudgetResult<()> {
    let export = LedgerExport::from_ledger(ledger);

    writeln!(writer, "# paycontrol ledger export ({})", ledger.year()).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer, "#").map_err(export_err)?;
    writeln!(writer, "# Restore with: paycontrol import <this file>").map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;

    Ok(())
}

/// Import from a YAML export
pub fn import_ledger_yaml(yaml_str: &str) -> BudgetResult<LedgerExport> {
    let export: LedgerExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BudgetError::Import(e.to_string()))?;

    export.validate().map_err(BudgetError::Import)?;

    Ok(export)
}
