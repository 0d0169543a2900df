//! Application state
//!
//! The whole ledger as one value: entries, category budgets and goals.
//! Loaded once from a [`BlobStore`] and written back as full snapshots.

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryBudgets, Goal, LedgerEntry};
use crate::storage::{keys, BlobStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub entries: Vec<LedgerEntry>,
    pub budgets: CategoryBudgets,
    pub goals: Vec<Goal>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every collection; keys never written load as empty
    pub fn load<S: BlobStore + ?Sized>(store: &S) -> TallyResult<Self> {
        let entries: Vec<LedgerEntry> = load_key(store, keys::ENTRIES)?;
        let budgets: CategoryBudgets = load_key(store, keys::BUDGETS)?;
        budgets
            .validate()
            .map_err(|e| TallyError::Storage(format!("Invalid {} blob: {}", keys::BUDGETS, e)))?;
        let goals: Vec<Goal> = load_key(store, keys::GOALS)?;
        for goal in &goals {
            goal.validate().map_err(|e| {
                TallyError::Storage(format!("Invalid {} blob: {}: {}", keys::GOALS, goal.id, e))
            })?;
        }

        info!(
            entries = entries.len(),
            budgets = budgets.len(),
            goals = goals.len(),
            "Loaded application state"
        );

        Ok(Self {
            entries,
            budgets,
            goals,
        })
    }

    /// Write every collection
    pub fn save<S: BlobStore + ?Sized>(&self, store: &mut S) -> TallyResult<()> {
        for key in keys::ALL {
            self.save_key(store, key)?;
        }
        Ok(())
    }

    /// Write the collection stored under `key`
    pub fn save_key<S: BlobStore + ?Sized>(&self, store: &mut S, key: &str) -> TallyResult<()> {
        let blob = match key {
            keys::ENTRIES => to_blob(&self.entries)?,
            keys::BUDGETS => to_blob(&self.budgets)?,
            keys::GOALS => to_blob(&self.goals)?,
            other => return Err(TallyError::Storage(format!("Unknown blob key: {}", other))),
        };
        store.store(key, &blob)?;
        debug!(key, "Saved state blob");
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.budgets.is_empty() && self.goals.is_empty()
    }
}

fn load_key<S, T>(store: &S, key: &str) -> TallyResult<T>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.load(key)? {
        Some(blob) if !blob.trim().is_empty() => serde_json::from_str(&blob)
            .map_err(|e| TallyError::Storage(format!("Failed to parse {} blob: {}", key, e))),
        _ => Ok(T::default()),
    }
}

fn to_blob<T: Serialize + ?Sized>(value: &T) -> TallyResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TallyError::Storage(format!("Failed to serialize data: {}", e)))
}
