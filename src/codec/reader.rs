//! Tolerant exchange-format reader
//!
//! Turns free-form tabular text (our own exports, or bank exports that share
//! the column names) into ledger entries. Reading never fails: rows that
//! cannot be turned into a valid entry are skipped and logged at debug level.
//! The only way to get nothing back from non-empty input is a header without
//! both a `date` and an `amount` column.
//!
//! Dates are tried against [`IMPORT_DATE_FORMATS`] in order, so an ambiguous
//! slash date such as `03/04/2025` reads month-first (4 March is not
//! considered). Timestamps like `2025-08-01 10:15` or `2025-08-02T00:00:00Z`
//! keep only their leading `YYYY-MM-DD`.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Terminator};
use tracing::{debug, warn};

use super::normalizer::normalize_kind;
use super::DELIMITER;
use crate::models::{Amount, EntryId, EntryKind, LedgerEntry};

/// Date formats tried in order when reading the `date` column
///
/// `%m/%d/%Y` precedes `%d/%m/%Y`; the day-first form only matches when the
/// first number cannot be a month.
pub const IMPORT_DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y", "%d/%m/%Y"];

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Whether the header provided the minimum viable schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaStatus {
    /// Header has both `date` and `amount`
    #[default]
    Ok,
    /// No non-blank lines at all
    Empty,
    MissingDateColumn,
    MissingAmountColumn,
}

impl SchemaStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Empty => write!(f, "no content"),
            Self::MissingDateColumn => write!(f, "header has no 'date' column"),
            Self::MissingAmountColumn => write!(f, "header has no 'amount' column"),
        }
    }
}

/// Entries read from a text, with counts for reporting
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Entries that passed every check, in source order
    pub entries: Vec<LedgerEntry>,
    /// Data rows seen (blank lines and the header excluded)
    pub rows_read: usize,
    /// Data rows dropped
    pub rows_skipped: usize,
    pub schema: SchemaStatus,
}

impl ImportOutcome {
    fn rejected(schema: SchemaStatus) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }
}

/// Why a row was dropped
#[derive(Debug, Clone, PartialEq)]
enum RowSkip {
    MissingDate,
    InvalidDate(String),
    MissingAmount,
    InvalidAmount(String),
    ZeroAmountWithoutType,
    NonPositiveAmount,
    Unreadable(String),
}

impl fmt::Display for RowSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDate => write!(f, "missing date"),
            Self::InvalidDate(s) => write!(f, "unrecognized date '{}'", s),
            Self::MissingAmount => write!(f, "missing amount"),
            Self::InvalidAmount(s) => write!(f, "unparseable amount '{}'", s),
            Self::ZeroAmountWithoutType => write!(f, "zero amount and no type"),
            Self::NonPositiveAmount => write!(f, "amount is not positive"),
            Self::Unreadable(e) => write!(f, "unreadable record: {}", e),
        }
    }
}

/// Column positions resolved from the header line
#[derive(Debug, Clone)]
struct ColumnIndex {
    id: Option<usize>,
    date: usize,
    kind: Option<usize>,
    amount: usize,
    category: Option<usize>,
    note: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &str) -> Result<Self, SchemaStatus> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, name) in header.split(DELIMITER).enumerate() {
            positions
                .entry(name.trim().to_lowercase())
                .or_insert(idx);
        }

        let date = *positions
            .get("date")
            .ok_or(SchemaStatus::MissingDateColumn)?;
        let amount = *positions
            .get("amount")
            .ok_or(SchemaStatus::MissingAmountColumn)?;

        Ok(Self {
            id: positions.get("id").copied(),
            date,
            kind: positions.get("type").copied(),
            amount,
            category: positions.get("category").copied(),
            note: positions.get("note").copied(),
        })
    }
}

/// Parse text into entries, dropping anything malformed
pub fn parse(text: &str) -> Vec<LedgerEntry> {
    parse_with_report(text).entries
}

/// Parse text into entries and report how many rows were dropped
pub fn parse_with_report(text: &str) -> ImportOutcome {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

    // `lines` accepts both "\n" and "\r\n"
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return ImportOutcome::rejected(SchemaStatus::Empty);
    };

    let columns = match ColumnIndex::from_header(header) {
        Ok(columns) => columns,
        Err(status) => {
            warn!(%status, "import text does not have the minimum columns");
            return ImportOutcome::rejected(status);
        }
    };

    let (line_numbers, body): (Vec<usize>, Vec<&str>) =
        lines.map(|(idx, line)| (idx + 1, line)).unzip();

    let mut outcome = ImportOutcome {
        rows_read: body.len(),
        ..ImportOutcome::default()
    };

    let joined = body.join("\n");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(DELIMITER as u8)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(joined.as_bytes());

    for (record, line_number) in reader.records().zip(line_numbers) {
        let parsed = record
            .map_err(|e| RowSkip::Unreadable(e.to_string()))
            .and_then(|record| parse_record(&record, &columns));

        match parsed {
            Ok(entry) => outcome.entries.push(entry),
            Err(reason) => {
                outcome.rows_skipped += 1;
                debug!(line = line_number, %reason, "skipping import row");
            }
        }
    }

    debug!(
        accepted = outcome.entries.len(),
        skipped = outcome.rows_skipped,
        "parsed import text"
    );
    outcome
}

/// Trimmed field at an optional position; absent columns read as ""
fn field(record: &StringRecord, column: Option<usize>) -> &str {
    column
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .unwrap_or("")
}

fn parse_record(record: &StringRecord, columns: &ColumnIndex) -> Result<LedgerEntry, RowSkip> {
    let date_text = field(record, Some(columns.date));
    if date_text.is_empty() {
        return Err(RowSkip::MissingDate);
    }
    let date = parse_date(date_text).ok_or_else(|| RowSkip::InvalidDate(date_text.to_string()))?;

    let declared = normalize_kind(field(record, columns.kind));
    let raw_amount = parse_amount(field(record, Some(columns.amount)))?;

    let kind = match declared {
        Some(kind) => kind,
        None => infer_kind(raw_amount).ok_or(RowSkip::ZeroAmountWithoutType)?,
    };

    // The sign has been used for inference; only the magnitude is kept
    let amount = Amount::new(raw_amount.abs()).ok_or(RowSkip::NonPositiveAmount)?;

    let id = EntryId::parse(field(record, columns.id)).unwrap_or_else(EntryId::generate);

    Ok(LedgerEntry::with_details(
        id,
        date,
        kind,
        amount,
        field(record, columns.category),
        field(record, columns.note),
    ))
}

/// Sign-based fallback when the type column is absent or unrecognized
fn infer_kind(amount: f64) -> Option<EntryKind> {
    if amount < 0.0 {
        Some(EntryKind::Expense)
    } else if amount > 0.0 {
        Some(EntryKind::Income)
    } else {
        None
    }
}

/// Parse an amount, dropping thousands separators
fn parse_amount(s: &str) -> Result<f64, RowSkip> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(RowSkip::MissingAmount);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RowSkip::InvalidAmount(s.to_string())),
    }
}

/// Parse a date trying each import format in turn, then an ISO date prefix
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    IMPORT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            s.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_positive_amount_without_type_is_income() {
        let entries = parse("date,amount\n2025-08-01,123.45");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert_eq!(entries[0].amount.value(), 123.45);
        assert_eq!(entries[0].date, ymd(2025, 8, 1));
    }

    #[test]
    fn test_negative_amount_without_type_is_expense() {
        let entries = parse("date,amount\n2025-08-02,-88.9");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Expense);
        assert_eq!(entries[0].amount.value(), 88.9);
    }

    #[test]
    fn test_type_column_tokens() {
        let entries = parse("date,type,amount\n2025-08-03,credit,100\n2025-08-04,debit,50");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert_eq!(entries[1].kind, EntryKind::Expense);
    }

    #[test]
    fn test_declared_type_wins_over_sign() {
        let entries = parse("date,type,amount\n2025-08-03,expense,-40\n2025-08-03,income,-10");
        assert_eq!(entries[0].kind, EntryKind::Expense);
        assert_eq!(entries[0].amount.value(), 40.0);
        assert_eq!(entries[1].kind, EntryKind::Income);
        assert_eq!(entries[1].amount.value(), 10.0);
    }

    #[test]
    fn test_unknown_type_falls_back_to_sign() {
        let entries = parse("date,type,amount\n2025-08-03,transfer,-15");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Expense);
    }

    #[test]
    fn test_zero_amount_without_type_is_dropped() {
        let outcome = parse_with_report("date,amount\n2025-08-09,0");
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.rows_read, 1);
        assert_eq!(outcome.rows_skipped, 1);
    }

    #[test]
    fn test_zero_amount_with_type_is_dropped() {
        assert!(parse("date,type,amount\n2025-08-09,expense,0").is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let plain = "date,amount\n2025-08-01,10\n2025-08-02,-5";
        let with_bom = format!("\u{feff}{}", plain);
        let a = parse(plain);
        let b = parse(&with_bom);
        assert_eq!(a.len(), 2);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.amount, y.amount);
        }
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let entries = parse("date,amount\r\n\r\n2025-08-01,10\r\n   \r\n2025-08-02,20\r\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].amount.value(), 20.0);
    }

    #[test]
    fn test_missing_schema_yields_nothing() {
        let outcome = parse_with_report("when,amount\n2025-08-01,10");
        assert!(outcome.entries.is_empty());
        assert_eq!(outcome.schema, SchemaStatus::MissingDateColumn);

        let outcome = parse_with_report("date,value\n2025-08-01,10");
        assert_eq!(outcome.schema, SchemaStatus::MissingAmountColumn);

        let outcome = parse_with_report("\n  \n");
        assert_eq!(outcome.schema, SchemaStatus::Empty);
    }

    #[test]
    fn test_header_is_case_insensitive_and_reordered() {
        let entries = parse("Note, Amount ,Category,DATE\nlunch,-12.5,food,2025-08-05");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].note, "lunch");
        assert_eq!(entries[0].category, "food");
        assert_eq!(entries[0].kind, EntryKind::Expense);
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let entries = parse("date,amount,category,note\n2025-08-05,-3");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "");
        assert_eq!(entries[0].note, "");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "date,amount\n\
                    2025-08-01,abc\n\
                    ,10\n\
                    2025-08-02,\n\
                    not-a-date,5\n\
                    2025-08-03,NaN\n\
                    2025-08-04,inf\n\
                    2025-08-05,7";
        let outcome = parse_with_report(text);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].amount.value(), 7.0);
        assert_eq!(outcome.rows_read, 7);
        assert_eq!(outcome.rows_skipped, 6);
    }

    #[test]
    fn test_numeric_ids_are_kept() {
        let entries = parse("id,date,amount\n1724300000000,2025-08-01,10\n 42 ,2025-08-01,10");
        assert_eq!(entries[0].id, EntryId::from_raw(1724300000000));
        assert_eq!(entries[1].id, EntryId::from_raw(42));
    }

    #[test]
    fn test_synthesized_ids_are_distinct() {
        let entries = parse("id,date,amount\nabc,2025-08-01,10\n,2025-08-01,10\nx,2025-08-01,10");
        assert_eq!(entries.len(), 3);
        assert_ne!(entries[0].id, entries[1].id);
        assert_ne!(entries[1].id, entries[2].id);
        assert_ne!(entries[0].id, entries[2].id);
    }

    #[test]
    fn test_other_date_formats() {
        let entries = parse("date,amount\n2025/08/01,1\n15.08.2025,2\n08/20/2025,3");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].date, ymd(2025, 8, 1));
        assert_eq!(entries[1].date, ymd(2025, 8, 15));
        assert_eq!(entries[2].date, ymd(2025, 8, 20));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let entries = parse("date,type,amount,category,note\n 2025-08-01 , Income , 10 , salary ,  bonus ");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "salary");
        assert_eq!(entries[0].note, "bonus");
    }

    #[test]
    fn test_quotes_are_not_special() {
        let entries = parse("date,amount,note\n2025-08-01,10,\"quoted\"");
        assert_eq!(entries[0].note, "\"quoted\"");
    }

    #[test]
    fn test_cyrillic_tokens() {
        let entries = parse("date,type,amount\n2025-08-01,Доход,100\n2025-08-02,расход,30");
        assert_eq!(entries[0].kind, EntryKind::Income);
        assert_eq!(entries[1].kind, EntryKind::Expense);
    }

    #[test]
    fn test_timestamped_dates_keep_the_day() {
        let entries = parse("date,amount\n2025-08-01 10:15,5\n2025-08-02T00:00:00Z,6");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, ymd(2025, 8, 1));
        assert_eq!(entries[1].date, ymd(2025, 8, 2));
    }

    #[test]
    fn test_ambiguous_slash_date_is_month_first() {
        assert_eq!(parse_date("03/04/2025"), Some(ymd(2025, 3, 4)));
        assert_eq!(parse_date("25/04/2025"), Some(ymd(2025, 4, 25)));
        assert_eq!(parse_date("2025-08"), None);
        assert_eq!(parse_date("garbage text"), None);
    }
}
