//! Ledger exchange format
//!
//! A deliberately simple comma-separated format with a fixed six-column
//! header. There is no quoting: the writer replaces commas inside free text
//! with semicolons and the reader splits positionally.
//!
//! - `normalizer`: maps loose direction tokens ("credit", "out", "+") to an
//!   [`EntryKind`](crate::models::EntryKind)
//! - `writer`: entries to text
//! - `reader`: tolerant text to entries

pub mod normalizer;
pub mod reader;
pub mod writer;

pub use normalizer::{normalize_kind, EXPENSE_TOKENS, INCOME_TOKENS};
pub use reader::{
    parse, parse_date, parse_with_report, ImportOutcome, SchemaStatus, IMPORT_DATE_FORMATS,
};
pub use writer::serialize;

/// Field delimiter
pub const DELIMITER: char = ',';

/// Replacement for delimiters found inside free-text fields
pub const DELIMITER_REPLACEMENT: char = ';';

/// Column names in write order
pub const COLUMNS: [&str; 6] = ["id", "date", "type", "amount", "category", "note"];

/// Header line written by [`serialize`]
pub const HEADER: &str = "id,date,type,amount,category,note";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_matches_columns() {
        assert_eq!(HEADER, COLUMNS.join(DELIMITER.to_string().as_str()));
    }
}
