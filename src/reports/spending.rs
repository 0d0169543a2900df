//! Spending Report
//!
//! Expense totals by category for a single period.

use crate::error::{TallyError, TallyResult};
use crate::models::{EntryKind, LedgerEntry, Period};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category label
    pub category: String,
    /// Sum of expense amounts
    pub total: f64,
    /// Number of expense entries
    pub count: usize,
    /// Share of the period's spending
    pub percentage: f64,
}

/// Spending snapshot for a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub period: Period,
    /// Categories, largest spend first
    pub categories: Vec<CategoryTotal>,
    /// Total spending across all categories
    pub total: f64,
    /// Total expense entry count
    pub entry_count: usize,
}

/// Sum expenses in `period` grouped by category
///
/// Entries with a blank category are counted under `catch_all`.
pub fn category_spend(entries: &[LedgerEntry], period: Period, catch_all: &str) -> CategorySpend {
    let mut by_category: HashMap<String, (f64, usize)> = HashMap::new();
    let mut total = 0.0;
    let mut entry_count = 0;

    for entry in entries
        .iter()
        .filter(|e| e.kind == EntryKind::Expense && period.contains(e.date))
    {
        let slot = by_category
            .entry(entry.category_or(catch_all).to_string())
            .or_insert((0.0, 0));
        slot.0 += entry.amount.value();
        slot.1 += 1;
        total += entry.amount.value();
        entry_count += 1;
    }

    let mut categories: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (sum, count))| CategoryTotal {
            category,
            total: sum,
            count,
            percentage: if total > 0.0 { sum / total * 100.0 } else { 0.0 },
        })
        .collect();

    categories.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    CategorySpend {
        period,
        categories,
        total,
        entry_count,
    }
}

impl CategorySpend {
    /// Spending for a category, zero when nothing was spent
    pub fn get(&self, category: &str) -> f64 {
        let category = category.trim();
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
            .unwrap_or(0.0)
    }

    /// Get top spending categories
    pub fn top_categories(&self, limit: usize) -> &[CategoryTotal] {
        &self.categories[..limit.min(self.categories.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report: {}\n", self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No spending recorded for this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                category.category,
                format!("{}{:.2}", currency, category.total),
                category.count,
                category.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>6}\n",
            "TOTAL SPENDING",
            format!("{}{:.2}", currency, self.total),
            self.entry_count
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        writeln!(writer, "Period,Category,Amount,Entry Count,Percentage")
            .map_err(|e| TallyError::Export(e.to_string()))?;

        for category in &self.categories {
            writeln!(
                writer,
                "{},{},{:.2},{},{:.2}",
                self.period,
                category.category.replace(',', ";"),
                category.total,
                category.count,
                category.percentage
            )
            .map_err(|e| TallyError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            "{},TOTAL,{:.2},{},100.00",
            self.period, self.total, self.entry_count
        )
        .map_err(|e| TallyError::Export(e.to_string()))?;

        Ok(())
    }
}
