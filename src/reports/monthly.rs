//! Monthly income/expense series
//!
//! Buckets entries by calendar month. Every requested period gets an
//! aggregate, zero-filled when nothing falls in it.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use super::round_half_up;
use crate::error::{TallyError, TallyResult};
use crate::models::{EntryKind, LedgerEntry, Period};

/// Income, expense and net for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub period: Period,
    pub income: f64,
    pub expense: f64,
    /// `income - expense`
    pub net: f64,
}

impl MonthlyAggregate {
    /// An aggregate with no activity
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        }
    }

    fn from_totals(period: Period, income: f64, expense: f64) -> Self {
        Self {
            period,
            income,
            expense,
            net: income - expense,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income == 0.0 && self.expense == 0.0
    }
}

/// Aggregate entries for each of `periods`, preserving their order
pub fn monthly_series(entries: &[LedgerEntry], periods: &[Period]) -> Vec<MonthlyAggregate> {
    let mut totals: HashMap<Period, (f64, f64)> = HashMap::new();
    for entry in entries {
        let slot = totals.entry(entry.period()).or_insert((0.0, 0.0));
        match entry.kind {
            EntryKind::Income => slot.0 += entry.amount.value(),
            EntryKind::Expense => slot.1 += entry.amount.value(),
        }
    }

    periods
        .iter()
        .map(|period| match totals.get(period) {
            Some((income, expense)) => MonthlyAggregate::from_totals(*period, *income, *expense),
            None => MonthlyAggregate::empty(*period),
        })
        .collect()
}

/// Aggregate for a single period
pub fn monthly_aggregate(entries: &[LedgerEntry], period: Period) -> MonthlyAggregate {
    monthly_series(entries, &[period])
        .pop()
        .unwrap_or_else(|| MonthlyAggregate::empty(period))
}

/// Mean `net` over the last `window` aggregates, rounded half-up
///
/// Uses fewer aggregates when the series is shorter than the window and
/// returns 0 when there is nothing to average.
pub fn rolling_average_net(series: &[MonthlyAggregate], window: usize) -> i64 {
    let start = series.len().saturating_sub(window);
    let tail = &series[start..];
    if tail.is_empty() {
        return 0;
    }

    let sum: f64 = tail.iter().map(|aggregate| aggregate.net).sum();
    round_half_up(sum / tail.len() as f64) as i64
}

/// Write a series as CSV (period,income,expense,net)
pub fn export_series_csv<W: Write>(series: &[MonthlyAggregate], writer: &mut W) -> TallyResult<()> {
    writeln!(writer, "Period,Income,Expense,Net").map_err(|e| TallyError::Export(e.to_string()))?;

    for aggregate in series {
        writeln!(
            writer,
            "{},{:.2},{:.2},{:.2}",
            aggregate.period, aggregate.income, aggregate.expense, aggregate.net
        )
        .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    Ok(())
}
