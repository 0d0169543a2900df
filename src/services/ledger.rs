//! Ledger service
//!
//! Owns the application state and the store it lives in. Every mutation
//! validates its input, updates the in-memory snapshot and then writes the
//! affected collection back to the store.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::codec::{self, SchemaStatus};
use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{Amount, EntryId, EntryKind, Goal, GoalId, LedgerEntry, Period};
use crate::reports::DashboardSummary;
use crate::state::AppState;
use crate::storage::{keys, BlobStore};

/// Input for creating or replacing an entry
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: f64,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl NewEntry {
    pub fn new(date: NaiveDate, kind: EntryKind, amount: f64) -> Self {
        Self {
            date,
            kind,
            amount,
            category: None,
            note: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Input for creating or replacing a goal
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target: f64,
    pub monthly: f64,
    /// Defaults to the current period
    pub start_period: Option<Period>,
}

/// Options for filtering entries
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub period: Option<Period>,
    pub kind: Option<EntryKind>,
    /// Matched case-insensitively against the trimmed label
    pub category: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl EntryFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(period) = self.period {
            if !period.contains(entry.date) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !entry.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        true
    }
}

/// Result of importing exchange-format text
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Data rows in the source
    pub rows_read: usize,
    /// Rows dropped by the reader
    pub rows_skipped: usize,
    /// Parsed entries whose id was already in the ledger or earlier in the batch
    pub duplicates: usize,
    /// Entries added
    pub imported: usize,
    pub schema: SchemaStatus,
}

/// Service for ledger management
pub struct LedgerService<S: BlobStore> {
    store: S,
    state: AppState,
    settings: Settings,
}

impl<S: BlobStore> LedgerService<S> {
    /// Load the state held by `store`
    pub fn open(store: S, settings: Settings) -> TallyResult<Self> {
        let state = AppState::load(&store)?;
        Ok(Self {
            store,
            state,
            settings,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ---- entries ----

    /// Record a new entry
    pub fn add_entry(&mut self, input: NewEntry) -> TallyResult<LedgerEntry> {
        let id = self.unused_entry_id();
        let entry = self.build_entry(id, input)?;

        let mut next = self.state.clone();
        next.entries.push(entry.clone());
        self.commit(next, keys::ENTRIES)?;

        info!(id = %entry.id, kind = %entry.kind, amount = %entry.amount, "Added entry");
        Ok(entry)
    }

    /// Replace every field of an entry except its id
    pub fn edit_entry(&mut self, id: EntryId, input: NewEntry) -> TallyResult<LedgerEntry> {
        let index = self.entry_index(id)?;
        let entry = self.build_entry(id, input)?;

        let mut next = self.state.clone();
        next.entries[index] = entry.clone();
        self.commit(next, keys::ENTRIES)?;

        info!(id = %id, "Edited entry");
        Ok(entry)
    }

    pub fn delete_entry(&mut self, id: EntryId) -> TallyResult<LedgerEntry> {
        let index = self.entry_index(id)?;
        let mut next = self.state.clone();
        let removed = next.entries.remove(index);
        self.commit(next, keys::ENTRIES)?;

        info!(id = %id, "Deleted entry");
        Ok(removed)
    }

    pub fn get_entry(&self, id: EntryId) -> Option<&LedgerEntry> {
        self.state.entries.iter().find(|e| e.id == id)
    }

    /// Entries matching `filter`, newest first
    pub fn list_entries(&self, filter: &EntryFilter) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self
            .state
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .collect();

        entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

        if let Some(limit) = filter.limit {
            entries.truncate(limit);
        }
        entries
    }

    // ---- import / export ----

    /// Parse `text` and report what an import would do, without changing anything
    pub fn preview_import(&self, text: &str) -> ImportSummary {
        self.plan_import(text).0
    }

    /// Parse `text` and append every entry whose id is new
    pub fn import_text(&mut self, text: &str) -> TallyResult<ImportSummary> {
        let (summary, fresh) = self.plan_import(text);

        if !fresh.is_empty() {
            let mut next = self.state.clone();
            next.entries.extend(fresh);
            self.commit(next, keys::ENTRIES)?;
        }

        info!(
            imported = summary.imported,
            duplicates = summary.duplicates,
            skipped = summary.rows_skipped,
            "Imported entries"
        );
        Ok(summary)
    }

    fn plan_import(&self, text: &str) -> (ImportSummary, Vec<LedgerEntry>) {
        let outcome = codec::parse_with_report(text);
        let mut seen: HashSet<EntryId> = self.state.entries.iter().map(|e| e.id).collect();

        let parsed = outcome.entries.len();
        let fresh: Vec<LedgerEntry> = outcome
            .entries
            .into_iter()
            .filter(|entry| {
                let is_new = seen.insert(entry.id);
                if !is_new {
                    debug!(id = %entry.id, "Skipping entry with known id");
                }
                is_new
            })
            .collect();

        let summary = ImportSummary {
            rows_read: outcome.rows_read,
            rows_skipped: outcome.rows_skipped,
            duplicates: parsed - fresh.len(),
            imported: fresh.len(),
            schema: outcome.schema,
        };
        (summary, fresh)
    }

    /// Replace the whole snapshot, e.g. from a full JSON or YAML export
    pub fn restore(&mut self, state: AppState) -> TallyResult<()> {
        state
            .budgets
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        state.save(&mut self.store)?;
        self.state = state;

        info!(
            entries = self.state.entries.len(),
            budgets = self.state.budgets.len(),
            goals = self.state.goals.len(),
            "Restored ledger"
        );
        Ok(())
    }

    /// Serialize the whole ledger in the exchange format
    pub fn export_csv(&self) -> String {
        codec::serialize(&self.state.entries)
    }

    // ---- budgets ----

    /// Set or replace a category's monthly cap
    pub fn set_budget(&mut self, label: &str, cap: f64) -> TallyResult<()> {
        let mut next = self.state.clone();
        next.budgets
            .set(label, cap)
            .map_err(|e| TallyError::Validation(e.to_string()))?;
        self.commit(next, keys::BUDGETS)?;

        info!(category = label.trim(), cap, "Set budget");
        Ok(())
    }

    /// Remove a category's cap, returning the old value
    pub fn remove_budget(&mut self, label: &str) -> TallyResult<f64> {
        let mut next = self.state.clone();
        let cap = next
            .budgets
            .remove(label)
            .ok_or_else(|| TallyError::budget_not_found(label.trim()))?;
        self.commit(next, keys::BUDGETS)?;

        info!(category = label.trim(), "Removed budget");
        Ok(cap)
    }

    // ---- goals ----

    pub fn add_goal(&mut self, input: NewGoal) -> TallyResult<Goal> {
        let goal = build_goal(GoalId::new(), input)?;

        if self
            .state
            .goals
            .iter()
            .any(|g| g.name.eq_ignore_ascii_case(&goal.name))
        {
            return Err(TallyError::Duplicate {
                entity_type: "Goal",
                identifier: goal.name,
            });
        }

        let mut next = self.state.clone();
        next.goals.push(goal.clone());
        self.commit(next, keys::GOALS)?;

        info!(id = %goal.id, name = %goal.name, "Added goal");
        Ok(goal)
    }

    /// Replace every field of a goal except its id
    pub fn update_goal(&mut self, id: GoalId, input: NewGoal) -> TallyResult<Goal> {
        let index = self.goal_index(id)?;
        let goal = build_goal(id, input)?;

        let mut next = self.state.clone();
        next.goals[index] = goal.clone();
        self.commit(next, keys::GOALS)?;

        info!(id = %id, "Updated goal");
        Ok(goal)
    }

    pub fn remove_goal(&mut self, id: GoalId) -> TallyResult<Goal> {
        let index = self.goal_index(id)?;
        let mut next = self.state.clone();
        let removed = next.goals.remove(index);
        self.commit(next, keys::GOALS)?;

        info!(id = %id, "Removed goal");
        Ok(removed)
    }

    /// Find a goal by full id, short id (`goal-1a2b3c4d`) or name
    pub fn find_goal(&self, identifier: &str) -> Option<&Goal> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<GoalId>() {
            return self.state.goals.iter().find(|g| g.id == id);
        }
        self.state.goals.iter().find(|g| {
            g.id.to_string() == identifier || g.name.eq_ignore_ascii_case(identifier)
        })
    }

    // ---- reports ----

    /// Dashboard summary for `reference_date`, sized by the settings
    pub fn summary(&self, reference_date: NaiveDate) -> DashboardSummary {
        DashboardSummary::generate(
            &self.state.entries,
            &self.state.budgets,
            &self.state.goals,
            reference_date,
            &self.settings.summary_options(),
        )
    }

    // ---- internals ----

    fn build_entry(&self, id: EntryId, input: NewEntry) -> TallyResult<LedgerEntry> {
        let amount = Amount::new(input.amount).ok_or_else(|| {
            TallyError::Validation(format!(
                "Amount must be a positive number, got {}",
                input.amount
            ))
        })?;

        let category = match input.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => match input.kind {
                EntryKind::Income => self.settings.income_category.clone(),
                EntryKind::Expense => self.settings.catch_all_category.clone(),
            },
        };

        Ok(LedgerEntry::with_details(
            id,
            input.date,
            input.kind,
            amount,
            category,
            input.note.unwrap_or_default().trim(),
        ))
    }

    fn unused_entry_id(&self) -> EntryId {
        loop {
            let id = EntryId::generate();
            if self.get_entry(id).is_none() {
                return id;
            }
        }
    }

    fn entry_index(&self, id: EntryId) -> TallyResult<usize> {
        self.state
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| TallyError::entry_not_found(id.to_string()))
    }

    fn goal_index(&self, id: GoalId) -> TallyResult<usize> {
        self.state
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| TallyError::goal_not_found(id.to_string()))
    }

    /// Write the `key` collection of `next`, then make it the current state
    ///
    /// On a failed write the current state is left untouched.
    fn commit(&mut self, next: AppState, key: &str) -> TallyResult<()> {
        next.save_key(&mut self.store, key)?;
        self.state = next;
        Ok(())
    }
}

fn build_goal(id: GoalId, input: NewGoal) -> TallyResult<Goal> {
    let goal = Goal {
        id,
        name: input.name.trim().to_string(),
        target: input.target,
        monthly: input.monthly,
        start_period: input.start_period.unwrap_or_else(Period::current),
    };
    goal.validate()
        .map_err(|e| TallyError::Validation(e.to_string()))?;
    Ok(goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn service() -> LedgerService<MemoryBlobStore> {
        LedgerService::open(MemoryBlobStore::new(), Settings::default()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_entry_saves() {
        let mut svc = service();
        let entry = svc
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 12.5).category("food"))
            .unwrap();

        assert_eq!(entry.category, "food");
        assert_eq!(svc.get_entry(entry.id), Some(&entry));
        assert!(svc.store().get(keys::ENTRIES).is_some());
    }

    #[test]
    fn test_add_entry_defaults_category() {
        let mut svc = service();
        let expense = svc
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 1.0))
            .unwrap();
        let income = svc
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Income, 1.0).category("  "))
            .unwrap();

        assert_eq!(expense.category, "other");
        assert_eq!(income.category, "income");
    }

    #[test]
    fn test_add_entry_rejects_bad_amount() {
        let mut svc = service();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = svc
                .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, amount))
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(svc.state().entries.is_empty());
        assert_eq!(svc.store().write_count(), 0);
    }

    #[test]
    fn test_edit_entry_replaces_fields() {
        let mut svc = service();
        let original = svc
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 10.0).note("old"))
            .unwrap();

        let edited = svc
            .edit_entry(
                original.id,
                NewEntry::new(date(2025, 8, 2), EntryKind::Income, 99.0).category("gift"),
            )
            .unwrap();

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.kind, EntryKind::Income);
        assert_eq!(edited.note, "");
        assert_eq!(svc.state().entries.len(), 1);
        assert_eq!(svc.get_entry(original.id), Some(&edited));
    }

    /// Loads like a memory store but refuses every write
    struct ReadOnlyStore(MemoryBlobStore);

    impl BlobStore for ReadOnlyStore {
        fn load(&self, key: &str) -> Result<Option<String>, TallyError> {
            self.0.load(key)
        }

        fn store(&mut self, key: &str, _blob: &str) -> Result<(), TallyError> {
            Err(TallyError::Storage(format!("read-only store: {}", key)))
        }
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let mut seeded = service();
        let entry = seeded
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 10.0))
            .unwrap();
        seeded.set_budget("food", 100.0).unwrap();
        seeded
            .add_goal(NewGoal {
                name: "Trip".to_string(),
                target: 500.0,
                monthly: 50.0,
                start_period: None,
            })
            .unwrap();
        let store = ReadOnlyStore(seeded.into_store());

        let mut svc = LedgerService::open(store, Settings::default()).unwrap();
        let before = svc.state().clone();
        let goal_id = before.goals[0].id;

        assert!(svc
            .add_entry(NewEntry::new(date(2025, 8, 2), EntryKind::Income, 5.0))
            .is_err());
        assert!(svc
            .edit_entry(entry.id, NewEntry::new(date(2025, 8, 3), EntryKind::Income, 7.0))
            .is_err());
        assert!(svc.delete_entry(entry.id).is_err());
        assert!(svc.import_text("date,amount\n2025-08-04,-3").is_err());
        assert!(svc.set_budget("rent", 900.0).is_err());
        assert!(svc.remove_budget("food").is_err());
        assert!(svc.remove_goal(goal_id).is_err());
        assert!(svc.restore(AppState::new()).is_err());

        assert_eq!(svc.state(), &before);
    }

    #[test]
    fn test_restore_replaces_everything() {
        let mut svc = service();
        svc.add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 10.0))
            .unwrap();

        let mut snapshot = AppState::new();
        snapshot.budgets.set("rent", 900.0).unwrap();
        svc.restore(snapshot).unwrap();

        assert!(svc.state().entries.is_empty());
        assert_eq!(svc.state().budgets.get("rent"), Some(900.0));
        assert!(svc.store().get(keys::BUDGETS).unwrap().contains("rent"));
    }

    #[test]
    fn test_edit_and_delete_missing_entry() {
        let mut svc = service();
        let id = EntryId::from_raw(42);
        assert!(svc
            .edit_entry(id, NewEntry::new(date(2025, 8, 1), EntryKind::Income, 1.0))
            .unwrap_err()
            .is_not_found());
        assert!(svc.delete_entry(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_entry() {
        let mut svc = service();
        let entry = svc
            .add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Income, 5.0))
            .unwrap();
        let removed = svc.delete_entry(entry.id).unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(svc.state().entries.is_empty());
    }

    #[test]
    fn test_list_entries_filters_and_sorts() {
        let mut svc = service();
        svc.add_entry(NewEntry::new(date(2025, 7, 30), EntryKind::Expense, 1.0).category("Food"))
            .unwrap();
        svc.add_entry(NewEntry::new(date(2025, 8, 3), EntryKind::Expense, 2.0).category("food"))
            .unwrap();
        svc.add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Income, 3.0))
            .unwrap();

        let all = svc.list_entries(&EntryFilter::new());
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date, date(2025, 8, 3));
        assert_eq!(all[2].date, date(2025, 7, 30));

        let august = svc.list_entries(&EntryFilter::new().period(Period::new(2025, 8).unwrap()));
        assert_eq!(august.len(), 2);

        let food = svc.list_entries(&EntryFilter::new().category("FOOD"));
        assert_eq!(food.len(), 2);

        let income = svc.list_entries(&EntryFilter::new().kind(EntryKind::Income));
        assert_eq!(income.len(), 1);

        assert_eq!(svc.list_entries(&EntryFilter::new().limit(1)).len(), 1);
    }

    #[test]
    fn test_import_skips_known_ids() {
        let mut svc = service();
        let text = "id,date,type,amount,category,note\n\
                    1,2025-08-01,income,100,income,\n\
                    2,2025-08-02,expense,20,food,\n\
                    2,2025-08-02,expense,20,food,\n\
                    x,not-a-date,expense,5,food,";

        let summary = svc.import_text(text).unwrap();
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.imported, 2);

        let again = svc.import_text(text).unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.duplicates, 3);
        assert_eq!(svc.state().entries.len(), 2);
    }

    #[test]
    fn test_preview_import_changes_nothing() {
        let svc = service();
        let summary = svc.preview_import("date,amount\n2025-08-01,5\n2025-08-02,-5");
        assert_eq!(summary.imported, 2);
        assert!(svc.state().entries.is_empty());
        assert_eq!(svc.store().write_count(), 0);
    }

    #[test]
    fn test_import_without_schema() {
        let mut svc = service();
        let summary = svc.import_text("when,how much\n2025-08-01,5").unwrap();
        assert_eq!(summary.schema, SchemaStatus::MissingDateColumn);
        assert_eq!(summary.imported, 0);
        assert_eq!(svc.store().write_count(), 0);
    }

    #[test]
    fn test_export_then_import_into_fresh_ledger() {
        let mut svc = service();
        svc.add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Income, 2500.0))
            .unwrap();
        svc.add_entry(NewEntry::new(date(2025, 8, 5), EntryKind::Expense, 42.1).note("a, b"))
            .unwrap();
        let text = svc.export_csv();

        let mut fresh = service();
        let summary = fresh.import_text(&text).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(fresh.state().entries[1].note, "a; b");
        assert_eq!(fresh.state().entries[1].amount, svc.state().entries[1].amount);
    }

    #[test]
    fn test_budgets() {
        let mut svc = service();
        svc.set_budget(" food ", 300.0).unwrap();
        assert_eq!(svc.state().budgets.get("food"), Some(300.0));

        assert!(svc.set_budget("food", -1.0).unwrap_err().is_validation());
        assert_eq!(svc.remove_budget("food").unwrap(), 300.0);
        assert!(svc.remove_budget("food").unwrap_err().is_not_found());
    }

    #[test]
    fn test_goals() {
        let mut svc = service();
        let goal = svc
            .add_goal(NewGoal {
                name: "Trip".to_string(),
                target: 1200.0,
                monthly: 100.0,
                start_period: Some(Period::new(2025, 1).unwrap()),
            })
            .unwrap();

        assert_eq!(svc.find_goal("trip").map(|g| g.id), Some(goal.id));
        assert_eq!(svc.find_goal(&goal.id.to_string()).map(|g| g.id), Some(goal.id));
        assert_eq!(
            svc.find_goal(&goal.id.as_uuid().to_string()).map(|g| g.id),
            Some(goal.id)
        );

        let duplicate = svc.add_goal(NewGoal {
            name: "TRIP".to_string(),
            target: 1.0,
            monthly: 0.0,
            start_period: None,
        });
        assert!(matches!(duplicate, Err(TallyError::Duplicate { .. })));

        let updated = svc
            .update_goal(
                goal.id,
                NewGoal {
                    name: "Trip".to_string(),
                    target: 1200.0,
                    monthly: 0.0,
                    start_period: None,
                },
            )
            .unwrap();
        assert_eq!(updated.months_to_completion(), None);

        svc.remove_goal(goal.id).unwrap();
        assert!(svc.remove_goal(goal.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_invalid_goal() {
        let mut svc = service();
        let err = svc
            .add_goal(NewGoal {
                name: "Trip".to_string(),
                target: 0.0,
                monthly: 10.0,
                start_period: None,
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_state_survives_reopen() {
        let mut svc = service();
        svc.add_entry(NewEntry::new(date(2025, 8, 1), EntryKind::Expense, 9.0))
            .unwrap();
        svc.set_budget("other", 5.0).unwrap();
        let store = svc.into_store();

        let reopened = LedgerService::open(store, Settings::default()).unwrap();
        assert_eq!(reopened.state().entries.len(), 1);
        let summary = reopened.summary(date(2025, 8, 15));
        assert!(summary.budgets[0].over_budget);
    }
}
