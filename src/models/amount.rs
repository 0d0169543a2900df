//! Amount type for ledger entry magnitudes
//!
//! An `Amount` is always finite and strictly positive. Direction lives on the
//! entry's kind, never in the sign, so there is no way to build a zero,
//! negative or NaN amount.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A strictly positive, finite monetary magnitude
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, rejecting zero, negative and non-finite values
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the numeric value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Parse a manually entered amount
    ///
    /// Accepts "1,250.50", "$12", " 8 ". Signed input is rejected; use the
    /// entry kind for direction.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        let cleaned = cleaned.strip_prefix('$').unwrap_or(&cleaned);

        let value: f64 = cleaned
            .trim()
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;

        Self::new(value).ok_or(AmountParseError::NotPositive(s.to_string()))
    }

    /// Format with a currency symbol and two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{:.2}", symbol, self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!("amount must be positive and finite, got {}", value))
        })
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    NotPositive(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::NotPositive(s) => write!(f, "Amount must be greater than zero: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
