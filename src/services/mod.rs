//! Service layer for Tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, defaults and persistence after each mutation.

pub mod ledger;

pub use ledger::{EntryFilter, ImportSummary, LedgerService, NewEntry, NewGoal};
