//! Budget consumption
//!
//! Compares each budgeted category's spend against its monthly cap.

use super::round_half_up;
use super::spending::CategorySpend;
use crate::error::{TallyError, TallyResult};
use crate::models::CategoryBudgets;
use serde::Serialize;
use std::io::Write;

/// Usage of one category's budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub category: String,
    /// Monthly cap
    pub cap: f64,
    /// Spent in the period
    pub consumed: f64,
    /// Whole-number percentage of the cap, capped at 100 (0 for a zero cap)
    pub ratio: u32,
    pub over_budget: bool,
}

impl BudgetUsage {
    pub fn new(category: impl Into<String>, cap: f64, consumed: f64) -> Self {
        let ratio = if cap > 0.0 {
            round_half_up(consumed / cap * 100.0).clamp(0.0, 100.0) as u32
        } else {
            0
        };

        Self {
            category: category.into(),
            cap,
            consumed,
            ratio,
            over_budget: cap > 0.0 && consumed > cap,
        }
    }

    /// Cap left to spend (negative when over)
    pub fn remaining(&self) -> f64 {
        self.cap - self.consumed
    }
}

/// Usage for every category that has a cap, in label order
pub fn budget_consumption(spend: &CategorySpend, budgets: &CategoryBudgets) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .map(|(category, cap)| BudgetUsage::new(category, cap, spend.get(category)))
        .collect()
}

/// Format budget usage for terminal display
pub fn format_usage_terminal(usage: &[BudgetUsage], currency: &str) -> String {
    let mut output = String::new();

    if usage.is_empty() {
        output.push_str("No budgets set.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>12} {:>6}\n",
        "Category", "Cap", "Spent", "Remaining", "Used"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for row in usage {
        let marker = if row.over_budget { " OVER" } else { "" };
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>5}%{}\n",
            row.category,
            format!("{}{:.2}", currency, row.cap),
            format!("{}{:.2}", currency, row.consumed),
            format!("{}{:.2}", currency, row.remaining()),
            row.ratio,
            marker
        ));
    }

    output
}

/// Export budget usage to CSV format
pub fn export_usage_csv<W: Write>(usage: &[BudgetUsage], writer: &mut W) -> TallyResult<()> {
    writeln!(writer, "Category,Cap,Consumed,Remaining,Ratio,Over Budget")
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for row in usage {
        writeln!(
            writer,
            "{},{:.2},{:.2},{:.2},{},{}",
            row.category.replace(',', ";"),
            row.cap,
            row.consumed,
            row.remaining(),
            row.ratio,
            row.over_budget
        )
        .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, EntryId, EntryKind, LedgerEntry, Period};
    use crate::reports::spending::category_spend;
    use chrono::NaiveDate;

    fn spend(items: &[(&str, f64)]) -> CategorySpend {
        let entries: Vec<LedgerEntry> = items
            .iter()
            .map(|(category, amount)| {
                LedgerEntry::with_details(
                    EntryId::generate(),
                    NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
                    EntryKind::Expense,
                    Amount::new(*amount).unwrap(),
                    *category,
                    "",
                )
            })
            .collect();
        category_spend(&entries, Period::new(2025, 8).unwrap(), "other")
    }

    #[test]
    fn test_ratio_rounds_to_whole_percent() {
        let usage = BudgetUsage::new("food", 300.0, 100.0);
        assert_eq!(usage.ratio, 33);
        assert!(!usage.over_budget);
        assert_eq!(usage.remaining(), 200.0);

        assert_eq!(BudgetUsage::new("food", 200.0, 1.0).ratio, 1);
        assert_eq!(BudgetUsage::new("food", 8.0, 1.0).ratio, 13);
    }

    #[test]
    fn test_ratio_capped_at_100() {
        let usage = BudgetUsage::new("food", 100.0, 5000.0);
        assert_eq!(usage.ratio, 100);
        assert!(usage.over_budget);
        assert_eq!(usage.remaining(), -4900.0);
    }

    #[test]
    fn test_exactly_at_cap_is_not_over() {
        let usage = BudgetUsage::new("food", 100.0, 100.0);
        assert_eq!(usage.ratio, 100);
        assert!(!usage.over_budget);
    }

    #[test]
    fn test_zero_cap_is_not_applicable() {
        let usage = BudgetUsage::new("fun", 0.0, 250.0);
        assert_eq!(usage.ratio, 0);
        assert!(!usage.over_budget);
    }

    #[test]
    fn test_consumption_covers_every_budget() {
        let mut budgets = CategoryBudgets::new();
        budgets.set("food", 200.0).unwrap();
        budgets.set("travel", 500.0).unwrap();

        let usage = budget_consumption(&spend(&[("food", 150.0), ("rent", 900.0)]), &budgets);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].category, "food");
        assert_eq!(usage[0].consumed, 150.0);
        assert_eq!(usage[0].ratio, 75);
        assert_eq!(usage[1].category, "travel");
        assert_eq!(usage[1].consumed, 0.0);
        assert_eq!(usage[1].ratio, 0);
    }

    #[test]
    fn test_budgets_untouched() {
        let mut budgets = CategoryBudgets::new();
        budgets.set("food", 10.0).unwrap();
        let before = budgets.clone();
        let _ = budget_consumption(&spend(&[("food", 50.0)]), &budgets);
        assert_eq!(budgets, before);
    }

    #[test]
    fn test_terminal_and_csv_output() {
        let usage = vec![BudgetUsage::new("food", 100.0, 120.0)];
        let text = format_usage_terminal(&usage, "$");
        assert!(text.contains("food"));
        assert!(text.contains("OVER"));

        let mut out = Vec::new();
        export_usage_csv(&usage, &mut out).unwrap();
        let csv_string = String::from_utf8(out).unwrap();
        assert!(csv_string.contains("food,100.00,120.00,-20.00,100,true"));

        assert!(format_usage_terminal(&[], "$").contains("No budgets"));
    }
}
