//! JSON Export functionality
//!
//! Exports the complete ledger to JSON format with schema versioning.

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryBudgets, Goal, LedgerEntry};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub entries: Vec<LedgerEntry>,

    #[serde(default)]
    pub budgets: CategoryBudgets,

    #[serde(default)]
    pub goals: Vec<Goal>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub entry_count: usize,
    pub budget_count: usize,
    pub goal_count: usize,

    /// Date range of entries (earliest)
    pub earliest_entry: Option<String>,

    /// Date range of entries (latest)
    pub latest_entry: Option<String>,
}

impl FullExport {
    /// Snapshot the application state
    pub fn from_state(state: &AppState) -> Self {
        let earliest_entry = state
            .entries
            .iter()
            .map(|e| e.date)
            .min()
            .map(|d| d.to_string());

        let latest_entry = state
            .entries
            .iter()
            .map(|e| e.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            entry_count: state.entries.len(),
            budget_count: state.budgets.len(),
            goal_count: state.goals.len(),
            earliest_entry,
            latest_entry,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: state.entries.clone(),
            budgets: state.budgets.clone(),
            goals: state.goals.clone(),
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut entry_ids = HashSet::new();
        for entry in &self.entries {
            if !entry_ids.insert(entry.id) {
                return Err(format!("Duplicate entry id {}", entry.id));
            }
        }

        self.budgets.validate().map_err(|e| e.to_string())?;

        let mut goal_ids = HashSet::new();
        for goal in &self.goals {
            if !goal_ids.insert(goal.id) {
                return Err(format!("Duplicate goal id {}", goal.id));
            }
            goal.validate()
                .map_err(|e| format!("Goal '{}': {}", goal.name, e))?;
        }

        Ok(())
    }

    /// Turn the export back into application state
    pub fn into_state(self) -> AppState {
        AppState {
            entries: self.entries,
            budgets: self.budgets,
            goals: self.goals,
        }
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(state: &AppState, writer: &mut W, pretty: bool) -> TallyResult<()> {
    let export = FullExport::from_state(state);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> TallyResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| TallyError::Import(e.to_string()))?;

    export.validate().map_err(TallyError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, EntryId, EntryKind, Period};
    use chrono::NaiveDate;

    fn sample_state() -> AppState {
        let mut state = AppState::new();
        for (id, day, kind, amount) in [
            (1, 3, EntryKind::Income, 2000.0),
            (2, 9, EntryKind::Expense, 45.5),
            (3, 1, EntryKind::Expense, 12.0),
        ] {
            state.entries.push(LedgerEntry::new(
                EntryId::from_raw(id),
                NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
                kind,
                Amount::new(amount).unwrap(),
            ));
        }
        state.budgets.set("food", 250.0).unwrap();
        state
            .goals
            .push(Goal::new("Trip", 900.0, 150.0, Period::new(2025, 9).unwrap()));
        state
    }

    #[test]
    fn test_full_export() {
        let export = FullExport::from_state(&sample_state());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.entry_count, 3);
        assert_eq!(export.metadata.budget_count, 1);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.earliest_entry.as_deref(), Some("2025-08-01"));
        assert_eq!(export.metadata.latest_entry.as_deref(), Some("2025-08-09"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let state = sample_state();
        let mut json_output = Vec::new();
        export_full_json(&state, &mut json_output, true).unwrap();

        let json_string = String::from_utf8(json_output).unwrap();
        let imported = import_from_json(&json_string).unwrap();

        assert_eq!(imported.into_state(), state);
    }

    #[test]
    fn test_empty_state_metadata() {
        let export = FullExport::from_state(&AppState::new());
        assert_eq!(export.metadata.entry_count, 0);
        assert!(export.metadata.earliest_entry.is_none());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_versions() {
        let mut export = FullExport::from_state(&sample_state());
        export.entries.push(export.entries[0].clone());
        assert!(export.validate().unwrap_err().contains("Duplicate entry id"));

        let mut export = FullExport::from_state(&sample_state());
        export.schema_version = "0.1.0".to_string();
        assert!(export.validate().unwrap_err().contains("Schema version"));
    }

    #[test]
    fn test_import_garbage_is_import_error() {
        let err = import_from_json("[]").unwrap_err();
        assert!(matches!(err, TallyError::Import(_)));
    }
}
