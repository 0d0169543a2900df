//! Report formatting utilities for terminal output

use crate::models::CategoryBudgets;
use crate::reports::BudgetUsage;

/// Format a signed amount with currency symbol, minus sign before the symbol
pub fn format_signed(amount: f64, currency: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency, -amount)
    } else {
        format!("{}{:.2}", currency, amount)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Budget caps as a table, with this period's usage bars when available
pub fn format_budget_table(
    budgets: &CategoryBudgets,
    usage: &[BudgetUsage],
    currency: &str,
) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<24} {:>12} {:>12}  {}\n",
        "Category", "Cap", "Spent", "Used"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for (category, cap) in budgets.iter() {
        let row = usage.iter().find(|u| u.category == category);
        let consumed = row.map(|u| u.consumed).unwrap_or(0.0);
        let ratio = row.map(|u| u.ratio).unwrap_or(0);
        output.push_str(&format!(
            "{:<24} {:>12} {:>12}  {} {:>3}%{}\n",
            truncate(category, 24),
            format_signed(cap, currency),
            format_signed(consumed, currency),
            format_bar(ratio as f64, 100.0, 10),
            ratio,
            if row.is_some_and(|u| u.over_budget) { " OVER" } else { "" }
        ));
    }

    output.push_str(&"-".repeat(70));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "TOTAL",
        format_signed(budgets.total(), currency)
    ));

    output
}
