//! JSON Export functionality
//!
//! Exports a full ledger year to JSON inside a versioned envelope.

use crate::error::{BudgetError, BudgetResult};
use crate::models::Ledger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The exported year
    pub ledger: Ledger,

    /// Export metadata
    #[serde(default)]
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub fixed_expense_count: usize,
    pub subscription_count: usize,
    pub expense_count: usize,
    pub payment_count: usize,
}

impl LedgerExport {
    /// Wrap a ledger for export
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let metadata = ExportMetadata {
            account_count: ledger.accounts().count(),
            fixed_expense_count: ledger.fixed_expenses().len(),
            subscription_count: ledger.subscriptions().len(),
            expense_count: ledger.expenses().len(),
            payment_count: ledger.payments().len(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger: ledger.clone(),
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        self.ledger.validate().map_err(|e| e.to_string())
    }
}

/// Export the ledger to JSON
pub fn export_ledger_json<W: Write>(
    ledger: &Ledger,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = LedgerExport::from_ledger(ledger);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export
pub fn import_ledger_json(json_str: &str) -> BudgetResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| BudgetError::Import(e.to_string()))?;

    export.validate().map_err(BudgetError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Expense, FixedExpense, Money};
    use chrono::NaiveDate;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new(2026);
        ledger.add_account(Account::new("A1", "Joint")).unwrap();
        ledger
            .add_fixed_expense(FixedExpense::new("f1", "A1", "Rent", Money::from_cents(50000), 1))
            .unwrap();
        ledger
            .add_expense(Expense::new(
                "e1",
                "A1",
                "Taxi",
                Money::from_cents(1250),
                NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            ))
            .unwrap();
        ledger
    }

    #[test]
    fn test_full_export() {
        let export = LedgerExport::from_ledger(&sample_ledger());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.account_count, 1);
        assert_eq!(export.metadata.fixed_expense_count, 1);
        assert_eq!(export.metadata.expense_count, 1);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_export_import() {
        let ledger = sample_ledger();
        let mut buffer = Vec::new();
        export_ledger_json(&ledger, &mut buffer, true).unwrap();

        let json_str = String::from_utf8(buffer).unwrap();
        assert!(json_str.contains("\"schema_version\""));
        assert!(json_str.contains("\"ledger\""));

        let imported = import_ledger_json(&json_str).unwrap();
        assert_eq!(imported.ledger, ledger);
    }

    #[test]
    fn test_import_rejects_schema_mismatch() {
        let mut export = LedgerExport::from_ledger(&sample_ledger());
        export.schema_version = "0.1.0".into();
        let json_str = serde_json::to_string(&export).unwrap();

        let err = import_ledger_json(&json_str).unwrap_err();
        assert!(matches!(err, BudgetError::Import(_)));
    }

    #[test]
    fn test_import_rejects_broken_ledger() {
        let json_str = r#"{
            "schema_version": "1.0.0",
            "exported_at": "2026-01-01T00:00:00Z",
            "app_version": "0.1.0",
            "ledger": {
                "year": 2026,
                "accounts": {},
                "fixed_expenses": [
                    {"id": "f1", "account_id": "ghost", "label": "Rent", "amount": 1.0, "due_day": 1}
                ],
                "subscriptions": [],
                "expenses": []
            }
        }"#;

        let err = import_ledger_json(json_str).unwrap_err();
        assert!(matches!(err, BudgetError::Import(_)));
    }

    #[test]
    fn test_import_garbage() {
        assert!(matches!(
            import_ledger_json("nope").unwrap_err(),
            BudgetError::Import(_)
        ));
    }
}
