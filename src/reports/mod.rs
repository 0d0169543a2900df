//! Reports module for Tally
//!
//! Pure aggregations over ledger snapshots: monthly series, category spend,
//! budget consumption, goal projection and the dashboard summary that
//! bundles them. Nothing here mutates its inputs or returns an error,
//! apart from writer failures during export.

pub mod budget_usage;
pub mod goals;
pub mod monthly;
pub mod spending;
pub mod summary;

pub use budget_usage::{budget_consumption, BudgetUsage};
pub use goals::{project_goal, project_goals, GoalProjection};
pub use monthly::{monthly_aggregate, monthly_series, rolling_average_net, MonthlyAggregate};
pub use spending::{category_spend, CategorySpend, CategoryTotal};
pub use summary::{DashboardSummary, SummaryOptions};

/// Round to the nearest integer, halves toward positive infinity
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
