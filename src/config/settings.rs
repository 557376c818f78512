//! User settings for paycontrol
//!
//! Holds the active budget year, display preferences, and the templates a
//! new year's ledger is seeded from.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::defaults::LedgerDefaults;
use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::storage::file_io::write_json_atomic;

/// User settings for paycontrol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// The budget year opened when no `--year` is given
    #[serde(default = "default_year")]
    pub year: i32,

    /// Reference cut-off day of the month, shown in month views
    #[serde(default = "default_control_day")]
    pub control_day: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Templates for seeding a new year
    #[serde(default)]
    pub defaults: LedgerDefaults,
}

fn default_schema_version() -> u32 {
    1
}

fn default_year() -> i32 {
    chrono::Local::now().year()
}

fn default_control_day() -> u32 {
    29
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            year: default_year(),
            control_day: default_control_day(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            defaults: LedgerDefaults::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject settings the rest of the crate cannot work with
    pub fn validate(&self) -> Result<(), BudgetError> {
        if !(1..=31).contains(&self.control_day) {
            return Err(BudgetError::Config(format!(
                "control_day must be 1-31 (got {})",
                self.control_day
            )));
        }
        if chrono::NaiveDate::from_ymd_opt(self.year, 1, 1).is_none() {
            return Err(BudgetError::Config(format!("Invalid year: {}", self.year)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.control_day, 29);
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.defaults.accounts.len(), 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.year = 2026;
        settings.control_day = 25;
        settings.defaults = LedgerDefaults::empty();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.year, 2026);
        assert_eq!(loaded.control_day, 25);
        assert!(loaded.defaults.accounts.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"year": 2027}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.year, 2027);
        assert_eq!(loaded.control_day, 29);
        assert_eq!(loaded.defaults, LedgerDefaults::default());
    }

    #[test]
    fn test_invalid_control_day_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"control_day": 40}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));
    }
}
