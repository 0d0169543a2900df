//! Export module for Tally
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: entries in the exchange format, budgets as a table
//! - JSON: machine-readable full ledger export
//! - YAML: human-readable full ledger export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budgets_csv, export_entries_csv, suggested_filename};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
