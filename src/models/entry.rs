//! Ledger entry model
//!
//! One recorded income or expense event. The magnitude is always positive;
//! the direction is carried by [`EntryKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::ids::EntryId;
use super::period::Period;
use crate::codec::normalize_kind;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Canonical lowercase name, as written to the exchange format
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    /// Accepts the same vocabulary as the importer ("credit", "out", "+", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_kind(s).ok_or_else(|| format!("Unrecognized entry kind: '{}'", s))
    }
}

/// A single financial event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Calendar date of the event
    pub date: NaiveDate,

    /// Income or expense
    pub kind: EntryKind,

    /// Positive magnitude
    pub amount: Amount,

    /// Free-text category label
    #[serde(default)]
    pub category: String,

    /// Free-text annotation
    #[serde(default)]
    pub note: String,
}

impl LedgerEntry {
    /// Create a new entry with empty category and note
    pub fn new(id: EntryId, date: NaiveDate, kind: EntryKind, amount: Amount) -> Self {
        Self {
            id,
            date,
            kind,
            amount,
            category: String::new(),
            note: String::new(),
        }
    }

    /// Create an entry with all fields
    pub fn with_details(
        id: EntryId,
        date: NaiveDate,
        kind: EntryKind,
        amount: Amount,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(id, date, kind, amount);
        entry.category = category.into();
        entry.note = note.into();
        entry
    }

    /// The period this entry falls in
    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Amount with sign applied (negative for expenses)
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount.value(),
            EntryKind::Expense => -self.amount.value(),
        }
    }

    /// Category label, or `fallback` when the entry has none
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            fallback
        } else {
            trimmed
        }
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.category_or("-")
        )
    }
}
