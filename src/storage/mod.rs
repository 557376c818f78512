//! Storage layer for paycontrol
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each budget year is one document under `data/`.

pub mod file_io;
pub mod init;
pub mod ledger_store;

pub use file_io::{read_json_optional, write_json_atomic};
pub use init::{initialize_storage, needs_initialization, InitReport};
pub use ledger_store::LedgerStore;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BudgetPaths, LedgerDefaults};
    use tempfile::TempDir;

    #[test]
    fn test_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = LedgerStore::new(paths, LedgerDefaults::empty()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(store.list_years().unwrap().is_empty());
        assert!(needs_initialization(store.paths()));
    }
}
