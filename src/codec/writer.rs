//! Entries to exchange-format text
//!
//! Output is lossy for free text: delimiters become semicolons and line
//! breaks become spaces, so every entry stays on one line with six fields.

use super::{DELIMITER, DELIMITER_REPLACEMENT, HEADER};
use crate::models::LedgerEntry;

/// Serialize entries, header first, `\n`-separated, without a trailing newline
pub fn serialize(entries: &[LedgerEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.to_string());
    lines.extend(entries.iter().map(format_row));
    lines.join("\n")
}

/// Format one entry as a row
pub fn format_row(entry: &LedgerEntry) -> String {
    let fields = [
        entry.id.to_string(),
        entry.date.format("%Y-%m-%d").to_string(),
        entry.kind.as_str().to_string(),
        entry.amount.to_string(),
        flatten_text(&entry.category),
        flatten_text(&entry.note),
    ];
    fields.join(DELIMITER.to_string().as_str())
}

fn flatten_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            DELIMITER => DELIMITER_REPLACEMENT,
            '\r' | '\n' => ' ',
            other => other,
        })
        .collect()
}
