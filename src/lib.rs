//! Tally - tolerant bank-export importer and monthly budget summaries
//!
//! This library provides the core functionality for the Tally command line
//! tool. It keeps a ledger of income and expense entries, reads loosely
//! formatted CSV exports into it, and derives monthly summaries, category
//! budget consumption and savings goal projections from it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `codec`: The CSV exchange format (tolerant reader, canonical writer)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, periods, budgets, goals)
//! - `storage`: Key/value blob persistence
//! - `state`: The persisted ledger snapshot
//! - `services`: Business logic layer
//! - `reports`: Pure aggregations and the dashboard summary
//! - `export`: CSV, JSON and YAML exports
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `tally` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::{Settings, TallyPaths};
//! use tally::services::LedgerService;
//! use tally::storage::FileBlobStore;
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut ledger = LedgerService::open(FileBlobStore::new(paths)?, settings)?;
//! ledger.import_text(&std::fs::read_to_string("bank.csv")?)?;
//! println!("{}", ledger.summary(chrono::Local::now().date_naive()).format_terminal("$"));
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{TallyError, TallyResult};
