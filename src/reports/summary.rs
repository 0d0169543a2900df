//! Dashboard summary
//!
//! Bundles every aggregation for one reference date so a front end can
//! render the whole dashboard from a single value.

use super::budget_usage::{budget_consumption, format_usage_terminal, BudgetUsage};
use super::goals::{format_projections_terminal, project_goals, GoalProjection};
use super::monthly::{export_series_csv, monthly_series, rolling_average_net, MonthlyAggregate};
use super::spending::{category_spend, CategorySpend};
use crate::error::TallyResult;
use crate::models::{CategoryBudgets, Goal, LedgerEntry, Period};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Knobs for [`DashboardSummary::generate`]
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    /// Length of the trailing series, ending at the reference period
    pub trailing_months: usize,
    /// Number of trailing periods averaged for the rolling net
    pub rolling_window: usize,
    /// Label for expenses without a category
    pub catch_all_category: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            trailing_months: 12,
            rolling_window: 3,
            catch_all_category: "other".to_string(),
        }
    }
}

/// Everything the dashboard shows for one reference date
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub reference_date: NaiveDate,
    pub current_period: Period,
    /// Trailing series, oldest first, current period last
    pub series: Vec<MonthlyAggregate>,
    /// Totals for the current period
    pub current: MonthlyAggregate,
    pub spending: CategorySpend,
    pub budgets: Vec<BudgetUsage>,
    pub rolling_average_net: i64,
    pub rolling_window: usize,
    pub goals: Vec<GoalProjection>,
}

impl DashboardSummary {
    pub fn generate(
        entries: &[LedgerEntry],
        budgets: &CategoryBudgets,
        goals: &[Goal],
        reference_date: NaiveDate,
        options: &SummaryOptions,
    ) -> Self {
        let current_period = Period::of(reference_date);
        let periods = Period::trailing(current_period, options.trailing_months.max(1));
        let series = monthly_series(entries, &periods);
        let current = series
            .last()
            .copied()
            .unwrap_or_else(|| MonthlyAggregate::empty(current_period));
        let spending = category_spend(entries, current_period, &options.catch_all_category);
        let budget_rows = budget_consumption(&spending, budgets);
        let rolling = rolling_average_net(&series, options.rolling_window);

        tracing::debug!(
            period = %current_period,
            entries = entries.len(),
            months = series.len(),
            "Computed dashboard summary"
        );

        Self {
            reference_date,
            current_period,
            series,
            current,
            spending,
            budgets: budget_rows,
            rolling_average_net: rolling,
            rolling_window: options.rolling_window,
            goals: project_goals(goals),
        }
    }

    /// Budgets whose spend exceeds the cap
    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetUsage> {
        self.budgets.iter().filter(|b| b.over_budget)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.current_period));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Income:   {:>14}\n",
            format!("{}{:.2}", currency, self.current.income)
        ));
        output.push_str(&format!(
            "Expenses: {:>14}\n",
            format!("{}{:.2}", currency, self.current.expense)
        ));
        output.push_str(&format!(
            "Net:      {:>14}\n",
            format!("{}{:.2}", currency, self.current.net)
        ));
        output.push_str(&format!(
            "Average net (last {} months): {}{}\n",
            self.rolling_window, currency, self.rolling_average_net
        ));

        output.push_str("\nMonthly\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format_series_terminal(&self.series, currency));

        output.push_str("\nTop spending\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.spending.is_empty() {
            output.push_str("No spending recorded for this period.\n");
        } else {
            for category in self.spending.top_categories(5) {
                output.push_str(&format!(
                    "{:<30} {:>12}\n",
                    category.category,
                    format!("{}{:.2}", currency, category.total)
                ));
            }
        }

        output.push_str("\nBudgets\n");
        output.push_str(&format_usage_terminal(&self.budgets, currency));

        output.push_str("\nGoals\n");
        output.push_str(&format_projections_terminal(&self.goals, currency));

        output
    }

    /// Export the monthly series to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        export_series_csv(&self.series, writer)
    }
}

/// Format a monthly series as a table
pub fn format_series_terminal(series: &[MonthlyAggregate], currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:>14} {:>14} {:>14}\n",
        "Period", "Income", "Expense", "Net"
    ));
    for aggregate in series {
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}\n",
            aggregate.period.to_string(),
            format!("{}{:.2}", currency, aggregate.income),
            format!("{}{:.2}", currency, aggregate.expense),
            format!("{}{:.2}", currency, aggregate.net)
        ));
    }
    output
}
