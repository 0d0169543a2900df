//! Core data models for Tally
//!
//! Ledger entries, the month period used as the aggregation bucket, category
//! budget caps and savings goals.

pub mod amount;
pub mod budget;
pub mod entry;
pub mod goal;
pub mod ids;
pub mod period;

pub use amount::{Amount, AmountParseError};
pub use budget::{BudgetValidationError, CategoryBudgets};
pub use entry::{EntryKind, LedgerEntry};
pub use goal::{Goal, GoalValidationError};
pub use ids::{EntryId, GoalId};
pub use period::{Period, PeriodParseError};
