//! Savings goal model
//!
//! A goal is a target amount reached by a fixed monthly contribution,
//! starting from a given period.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::period::Period;

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    /// Amount to reach (positive)
    pub target: f64,
    /// Monthly contribution (zero means no ETA)
    #[serde(default)]
    pub monthly: f64,
    /// First month of contributions
    pub start_period: Period,
}

impl Goal {
    pub fn new(name: impl Into<String>, target: f64, monthly: f64, start_period: Period) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target,
            monthly,
            start_period,
        }
    }

    /// Months needed to reach the target
    ///
    /// `None` when nothing is contributed or the target is not positive.
    pub fn months_to_completion(&self) -> Option<u32> {
        let valid_target = self.target.is_finite() && self.target > 0.0;
        if valid_target && self.monthly > 0.0 && self.monthly.is_finite() {
            let months = (self.target / self.monthly).ceil();
            if months <= u32::MAX as f64 {
                return Some(months as u32);
            }
        }
        None
    }

    /// Period in which the last contribution lands
    ///
    /// A goal needing `n` months that starts in January completes in the
    /// `n - 1`th month after it.
    pub fn completion_period(&self) -> Option<Period> {
        self.months_to_completion()
            .map(|months| self.start_period.advance(months.saturating_sub(1)))
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target.is_finite() || self.target <= 0.0 {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if !self.monthly.is_finite() || self.monthly < 0.0 {
            return Err(GoalValidationError::NegativeMonthly);
        }
        Ok(())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} @ {}/month)", self.name, self.target, self.monthly)
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NegativeMonthly,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be greater than zero"),
            Self::NegativeMonthly => write!(f, "Monthly contribution cannot be negative"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
