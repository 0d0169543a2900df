//! Entry display formatting
//!
//! Register views and detail blocks for ledger entries.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use super::report::{format_signed, truncate};
use crate::models::LedgerEntry;

/// Format a date with a user-supplied strftime pattern, ISO if the pattern is invalid
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return date.format("%Y-%m-%d").to_string();
    }
    date.format(date_format).to_string()
}

/// Format a single entry as a register row
pub fn format_entry_row(entry: &LedgerEntry, currency: &str, date_format: &str) -> String {
    format!(
        "{:<14} {:<10} {:<7} {:<16} {:>12}  {}",
        entry.id.to_string(),
        format_date(entry.date, date_format),
        entry.kind.as_str(),
        truncate(&entry.category, 16),
        format_signed(entry.signed_amount(), currency),
        truncate(&entry.note, 30)
    )
}

/// Format a list of entries as a register
pub fn format_entry_register(entries: &[&LedgerEntry], currency: &str, date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14} {:<10} {:<7} {:<16} {:>12}  {}\n",
        "ID", "Date", "Type", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    let mut net = 0.0;
    for entry in entries {
        output.push_str(&format_entry_row(entry, currency, date_format));
        output.push('\n');
        net += entry.signed_amount();
    }

    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{} entries, net {}\n",
        entries.len(),
        format_signed(net, currency)
    ));

    output
}

/// Format entry details for display
pub fn format_entry_details(entry: &LedgerEntry, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:    {}\n", entry.id));
    output.push_str(&format!("Date:     {}\n", entry.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:     {}\n", entry.kind));
    output.push_str(&format!("Amount:   {}\n", entry.amount.format_with_symbol(currency)));

    if entry.category.is_empty() {
        output.push_str("Category: (none)\n");
    } else {
        output.push_str(&format!("Category: {}\n", entry.category));
    }

    if !entry.note.is_empty() {
        output.push_str(&format!("Note:     {}\n", entry.note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, EntryId, EntryKind};

    fn entry(kind: EntryKind) -> LedgerEntry {
        LedgerEntry::with_details(
            EntryId::from_raw(1754000000000),
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            kind,
            Amount::new(50.0).unwrap(),
            "Groceries",
            "Weekly shop",
        )
    }

    #[test]
    fn test_format_entry_row() {
        let formatted = format_entry_row(&entry(EntryKind::Expense), "$", "%Y-%m-%d");
        assert!(formatted.contains("2025-08-01"));
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("-$50.00"));

        let income = format_entry_row(&entry(EntryKind::Income), "$", "%d/%m/%Y");
        assert!(income.contains("01/08/2025"));
        assert!(income.contains("$50.00"));
        assert!(!income.contains("-$50.00"));
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(format_date(date, "%Q"), "2025-08-01");
        assert_eq!(format_date(date, "%d.%m.%Y"), "01.08.2025");
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_entry_register(&[], "$", "%Y-%m-%d");
        assert!(formatted.contains("No entries found"));
    }

    #[test]
    fn test_register_net() {
        let a = entry(EntryKind::Income);
        let b = entry(EntryKind::Expense);
        let formatted = format_entry_register(&[&a, &b, &b], "$", "%Y-%m-%d");
        assert!(formatted.contains("3 entries, net -$50.00"));
    }

    #[test]
    fn test_format_entry_details() {
        let formatted = format_entry_details(&entry(EntryKind::Expense), "$");
        assert!(formatted.contains("1754000000000"));
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("Weekly shop"));
        assert!(formatted.contains("$50.00"));
    }
}
