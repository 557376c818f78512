//! Ledger store: one JSON document per budget year
//!
//! The store is the only component that reads or writes ledger documents.
//! Loading is read-only; saving replaces the document atomically.

use std::path::PathBuf;
use std::time::SystemTime;

use tracing::{debug, info};

use crate::config::defaults::LedgerDefaults;
use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Ledger;

use super::file_io::{read_json_optional, write_json_atomic};

/// Loads and saves per-year ledger documents
#[derive(Debug, Clone)]
pub struct LedgerStore {
    paths: BudgetPaths,
    defaults: LedgerDefaults,
}

impl LedgerStore {
    /// Create a store rooted at `paths`, seeding new years from `defaults`
    pub fn new(paths: BudgetPaths, defaults: LedgerDefaults) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths, defaults })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Get the seeding templates
    pub fn defaults(&self) -> &LedgerDefaults {
        &self.defaults
    }

    /// Path of the document for `year`
    pub fn document_path(&self, year: i32) -> PathBuf {
        self.paths.ledger_file(year)
    }

    /// Whether a document for `year` exists on disk
    pub fn exists(&self, year: i32) -> bool {
        self.document_path(year).exists()
    }

    /// Load the ledger for `year`
    ///
    /// A missing document yields a fresh ledger seeded from the defaults;
    /// nothing is written until [`save`](Self::save) is called. A document
    /// that is malformed, belongs to another year, or breaks a ledger
    /// invariant is reported as [`BudgetError::CorruptData`].
    pub fn load(&self, year: i32) -> BudgetResult<Ledger> {
        let path = self.document_path(year);

        let Some(ledger) = read_json_optional::<Ledger, _>(&path)? else {
            debug!(year, "no ledger document, seeding from defaults");
            return Ledger::seeded(year, &self.defaults);
        };

        if ledger.year() != year {
            return Err(BudgetError::CorruptData(format!(
                "{} holds year {}, expected {}",
                path.display(),
                ledger.year(),
                year
            )));
        }

        ledger.validate().map_err(|e| {
            BudgetError::CorruptData(format!("{}: {}", path.display(), e))
        })?;

        debug!(
            year,
            accounts = ledger.accounts().count(),
            expenses = ledger.expenses().len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Persist `ledger` to its year's document
    ///
    /// The ledger is validated first. On failure the previous document is
    /// left intact.
    pub fn save(&self, ledger: &Ledger) -> BudgetResult<()> {
        ledger.validate()?;

        let path = self.document_path(ledger.year());
        write_json_atomic(&path, ledger)?;

        info!(year = ledger.year(), path = %path.display(), "ledger saved");
        Ok(())
    }

    /// Years that have a document on disk, ascending
    pub fn list_years(&self) -> BudgetResult<Vec<i32>> {
        let dir = self.paths.data_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir)
            .map_err(|e| BudgetError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

        let mut years: Vec<i32> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(BudgetPaths::year_from_file_name)
            })
            .collect();
        years.sort_unstable();
        Ok(years)
    }

    /// Last modification time of the document for `year`, if it exists
    pub fn modified_at(&self, year: i32) -> BudgetResult<Option<SystemTime>> {
        let path = self.document_path(year);
        if !path.exists() {
            return Ok(None);
        }
        let meta = std::fs::metadata(&path)?;
        Ok(Some(meta.modified()?))
    }
}
