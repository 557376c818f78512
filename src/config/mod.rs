//! Configuration module for paycontrol
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Default household templates for seeding a new year

pub mod defaults;
pub mod paths;
pub mod settings;

pub use defaults::LedgerDefaults;
pub use paths::BudgetPaths;
pub use settings::Settings;
