//! Storage initialization
//!
//! Handles first-run setup: settings file plus the seeded ledger for a year.

use tracing::info;

use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetResult;

use super::ledger_store::LedgerStore;

/// What [`initialize_storage`] actually created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub settings_created: bool,
    pub ledger_created: bool,
}

/// Initialize storage for `year`
///
/// Writes `config.json` if missing and the seeded ledger document for `year`
/// if missing. Existing files are left untouched.
pub fn initialize_storage(
    paths: &BudgetPaths,
    settings: &Settings,
    year: i32,
) -> BudgetResult<InitReport> {
    paths.ensure_directories()?;

    let mut report = InitReport::default();

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        report.settings_created = true;
    }

    let store = LedgerStore::new(paths.clone(), settings.defaults.clone())?;
    if !store.exists(year) {
        let ledger = store.load(year)?;
        store.save(&ledger)?;
        report.ledger_created = true;
    }

    info!(year, ?report, "storage initialized");
    Ok(report)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.settings_file().exists()
}
