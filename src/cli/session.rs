//! Ledger session for CLI commands
//!
//! Keeps the loaded ledger for one year alongside the document's mtime. A
//! change on disk made by someone else triggers a reload; every commit goes
//! through the store and refreshes the cache.

use std::time::SystemTime;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Ledger;
use crate::storage::LedgerStore;

struct Cached {
    ledger: Ledger,
    modified: Option<SystemTime>,
}

/// Cached access to one ledger year
pub struct Session {
    store: LedgerStore,
    year: i32,
    cached: Option<Cached>,
}

impl Session {
    pub fn new(store: LedgerStore, year: i32) -> Self {
        Self {
            store,
            year,
            cached: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// January 1st of the session year
    pub fn year_start(&self) -> BudgetResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
            .ok_or_else(|| BudgetError::Validation(format!("Invalid year: {}", self.year)))
    }

    /// The current ledger, reloaded if the document changed since last read
    pub fn ledger(&mut self) -> BudgetResult<&Ledger> {
        let modified = self.store.modified_at(self.year)?;

        let cached = match self.cached.take() {
            Some(cached) if cached.modified == modified => cached,
            previous => {
                if previous.is_some() {
                    debug!(year = self.year, "ledger changed on disk, reloading");
                }
                Cached {
                    ledger: self.store.load(self.year)?,
                    modified,
                }
            }
        };

        Ok(&self.cached.insert(cached).ledger)
    }

    /// Load, apply `mutate`, save
    ///
    /// `mutate` works on a copy: if it fails, or the save fails, neither the
    /// cache nor the document change.
    pub fn commit<T, F>(&mut self, mutate: F) -> BudgetResult<T>
    where
        F: FnOnce(&mut Ledger) -> BudgetResult<T>,
    {
        let mut ledger = self.ledger()?.clone();
        let value = mutate(&mut ledger)?;

        self.store.save(&ledger)?;
        let modified = self.store.modified_at(self.year)?;
        self.cached = Some(Cached { ledger, modified });

        Ok(value)
    }

    /// Replace the ledger wholesale (used by import)
    pub fn replace(&mut self, ledger: Ledger) -> BudgetResult<()> {
        self.store.save(&ledger)?;
        let modified = self.store.modified_at(self.year)?;
        self.cached = Some(Cached { ledger, modified });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BudgetPaths, LedgerDefaults};
    use crate::error::BudgetError;
    use crate::models::Account;
    use std::fs;
    use tempfile::TempDir;

    fn create_session() -> (TempDir, Session) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = LedgerStore::new(paths, LedgerDefaults::empty()).unwrap();
        (temp_dir, Session::new(store, 2026))
    }

    #[test]
    fn test_commit_persists() {
        let (_temp_dir, mut session) = create_session();

        session
            .commit(|ledger| ledger.add_account(Account::new("A1", "Joint")))
            .unwrap();

        assert!(session.store().exists(2026));
        let reloaded = session.store().load(2026).unwrap();
        assert_eq!(reloaded.accounts().count(), 1);
    }

    #[test]
    fn test_failed_commit_changes_nothing() {
        let (_temp_dir, mut session) = create_session();
        session
            .commit(|ledger| ledger.add_account(Account::new("A1", "Joint")))
            .unwrap();

        let err = session
            .commit(|ledger| {
                ledger.add_account(Account::new("B2", "Savings"))?;
                Err::<(), _>(BudgetError::Validation("stop".into()))
            })
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(session.ledger().unwrap().accounts().count(), 1);
        assert_eq!(session.store().load(2026).unwrap().accounts().count(), 1);
    }

    #[test]
    fn test_reloads_after_external_change() {
        let (_temp_dir, mut session) = create_session();
        session
            .commit(|ledger| ledger.add_account(Account::new("A1", "Joint")))
            .unwrap();
        assert_eq!(session.ledger().unwrap().accounts().count(), 1);

        // Another writer replaces the document
        let mut other = session.store().load(2026).unwrap();
        other.add_account(Account::new("B2", "Savings")).unwrap();
        let path = session.store().document_path(2026);
        fs::write(&path, serde_json::to_string(&other).unwrap()).unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(5);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert_eq!(session.ledger().unwrap().accounts().count(), 2);
    }
}
