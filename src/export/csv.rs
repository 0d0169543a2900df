//! CSV Export functionality
//!
//! Entries are exported in the ledger exchange format so the file can be
//! imported again. Budgets get a plain spreadsheet-friendly table.

use crate::codec;
use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryBudgets, LedgerEntry};
use chrono::NaiveDate;
use std::io::Write;

/// Suggested download name for an entries export made on `date`
pub fn suggested_filename(date: NaiveDate) -> String {
    format!("tally-{}.csv", date.format("%Y-%m-%d"))
}

/// Export entries in the exchange format
pub fn export_entries_csv<W: Write>(entries: &[LedgerEntry], writer: &mut W) -> TallyResult<()> {
    writer
        .write_all(codec::serialize(entries).as_bytes())
        .map_err(|e| TallyError::Export(e.to_string()))?;

    tracing::info!(entries = entries.len(), "Exported entries");
    Ok(())
}

/// Export budget caps to CSV
pub fn export_budgets_csv<W: Write>(budgets: &CategoryBudgets, writer: W) -> TallyResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Category", "Cap"])
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for (category, cap) in budgets.iter() {
        csv_writer
            .write_record([category, format!("{:.2}", cap).as_str()])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}
