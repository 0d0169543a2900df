//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display.

pub mod entry;
pub mod report;

pub use entry::{format_date, format_entry_details, format_entry_register, format_entry_row};
pub use report::{format_bar, format_budget_table, format_signed, truncate};
