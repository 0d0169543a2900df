//! Identifier types for ledger entries and goals
//!
//! Entry ids are plain integers because bank exports and the exchange format
//! carry them as numbers. Goal ids are UUIDs, as they never leave the app.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// Last value handed out by [`EntryId::generate`]
static LAST_GENERATED: AtomicI64 = AtomicI64::new(0);

/// Identifier of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wrap an id taken from source data
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Synthesize a fresh id
    ///
    /// Ids are seeded from the wall clock in milliseconds and strictly
    /// increase within the process, so two calls never return the same
    /// value even when made in the same millisecond.
    pub fn generate() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_GENERATED.load(Ordering::Relaxed);
        loop {
            let next = if now > last { now } else { last + 1 };
            match LAST_GENERATED.compare_exchange_weak(
                last,
                next,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(next),
                Err(actual) => last = actual,
            }
        }
    }

    /// Get the raw integer value
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Parse an id from text, ignoring surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<i64>().ok().map(Self)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Unique identifier for a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "goal-{}", &self.0.to_string()[..8])
    }
}

impl FromStr for GoalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Self(Uuid::parse_str(s.strip_prefix("goal-").unwrap_or(s))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_never_repeat() {
        let ids: HashSet<EntryId> = (0..10_000).map(|_| EntryId::generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_generated_ids_increase() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert!(b > a);
    }

    #[test]
    fn test_entry_id_parse() {
        assert_eq!(EntryId::parse(" 42 "), Some(EntryId::from_raw(42)));
        assert_eq!(EntryId::parse("-7"), Some(EntryId::from_raw(-7)));
        assert_eq!(EntryId::parse("abc"), None);
        assert_eq!(EntryId::parse(""), None);
    }

    #[test]
    fn test_entry_id_serialization() {
        let id = EntryId::from_raw(1724300000000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1724300000000");
        let back: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_goal_id_display_and_parse() {
        let id = GoalId::new();
        let display = id.to_string();
        assert!(display.starts_with("goal-"));
        assert_eq!(display.len(), 13);

        let full = id.as_uuid().to_string();
        assert_eq!(full.parse::<GoalId>().unwrap(), id);
    }
}
