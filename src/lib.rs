//! paycontrol - household annual budget ledger
//!
//! One JSON document per calendar year holds the household's accounts,
//! fixed expenses, subscriptions, one-off expenses and the record of which
//! recurring items were paid in which month. The calculator derives month
//! views, pending totals and per-account balances from that document.
//!
//! # Architecture
//!
//! - `config`: paths, settings and the templates used to seed a new year
//! - `error`: the crate error type
//! - `models`: the ledger and its items
//! - `storage`: atomic JSON persistence, one document per year
//! - `calculator`: totals, month views and account summaries
//! - `export`: JSON/YAML/CSV exports and the pending list
//! - `display`: terminal formatting
//! - `cli`: command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use paycontrol::config::{BudgetPaths, Settings};
//! use paycontrol::storage::LedgerStore;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = LedgerStore::new(paths, settings.defaults.clone())?;
//! let ledger = store.load(settings.year)?;
//! ```

use std::sync::Once;

pub mod calculator;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides
/// the default `paycontrol=warn` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("paycontrol=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
