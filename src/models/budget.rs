//! Category budget caps
//!
//! An open, runtime-extensible mapping from category label to a monthly cap.
//! Labels are free text, so this is a map rather than an enum.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Monthly spending caps keyed by category label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBudgets(BTreeMap<String, f64>);

impl CategoryBudgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the cap for a category
    pub fn set(&mut self, label: impl Into<String>, cap: f64) -> Result<(), BudgetValidationError> {
        let label = label.into().trim().to_string();
        if label.is_empty() {
            return Err(BudgetValidationError::EmptyLabel);
        }
        if !cap.is_finite() {
            return Err(BudgetValidationError::NonFiniteCap);
        }
        if cap < 0.0 {
            return Err(BudgetValidationError::NegativeCap);
        }
        self.0.insert(label, cap);
        Ok(())
    }

    /// Remove a category's cap, returning it if present
    pub fn remove(&mut self, label: &str) -> Option<f64> {
        self.0.remove(label.trim())
    }

    /// Get the cap for a category
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label.trim()).copied()
    }

    /// Iterate over (label, cap) pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, cap)| (label.as_str(), *cap))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all caps
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Check every stored cap, used after loading from an external source
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        for (label, cap) in &self.0 {
            if label.trim().is_empty() {
                return Err(BudgetValidationError::EmptyLabel);
            }
            if !cap.is_finite() {
                return Err(BudgetValidationError::NonFiniteCap);
            }
            if *cap < 0.0 {
                return Err(BudgetValidationError::NegativeCap);
            }
        }
        Ok(())
    }
}

/// Validation errors for budget caps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyLabel,
    NegativeCap,
    NonFiniteCap,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "Budget category label cannot be empty"),
            Self::NegativeCap => write!(f, "Budget cap cannot be negative"),
            Self::NonFiniteCap => write!(f, "Budget cap must be a finite number"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
