//! Goal projection

use crate::error::{TallyError, TallyResult};
use crate::models::{Goal, GoalId, Period};
use serde::Serialize;
use std::io::Write;

/// Time-to-completion estimate for a goal
///
/// Both fields are `None` when the goal has no monthly contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub goal_id: GoalId,
    pub name: String,
    pub target: f64,
    pub monthly: f64,
    pub start_period: Period,
    pub months_to_completion: Option<u32>,
    pub completion_period: Option<Period>,
}

impl GoalProjection {
    pub fn has_eta(&self) -> bool {
        self.months_to_completion.is_some()
    }
}

/// Project a single goal
pub fn project_goal(goal: &Goal) -> GoalProjection {
    GoalProjection {
        goal_id: goal.id,
        name: goal.name.clone(),
        target: goal.target,
        monthly: goal.monthly,
        start_period: goal.start_period,
        months_to_completion: goal.months_to_completion(),
        completion_period: goal.completion_period(),
    }
}

/// Project every goal, preserving order
pub fn project_goals(goals: &[Goal]) -> Vec<GoalProjection> {
    goals.iter().map(project_goal).collect()
}

pub fn format_projections_terminal(projections: &[GoalProjection], currency: &str) -> String {
    let mut output = String::new();

    if projections.is_empty() {
        output.push_str("No goals defined.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<24} {:>12} {:>12} {:>8} {:>8} {:>9}\n",
        "Goal", "Target", "Monthly", "Start", "Months", "Done"
    ));
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for p in projections {
        let (months, done) = match (p.months_to_completion, p.completion_period) {
            (Some(months), Some(period)) => (months.to_string(), period.to_string()),
            _ => ("-".to_string(), "no ETA".to_string()),
        };
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>8} {:>8} {:>9}\n",
            p.name,
            format!("{}{:.2}", currency, p.target),
            format!("{}{:.2}", currency, p.monthly),
            p.start_period.to_string(),
            months,
            done
        ));
    }

    output
}

pub fn export_projections_csv<W: Write>(
    projections: &[GoalProjection],
    writer: &mut W,
) -> TallyResult<()> {
    writeln!(writer, "Goal ID,Name,Target,Monthly,Start,Months,Completion")
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for p in projections {
        writeln!(
            writer,
            "{},{},{:.2},{:.2},{},{},{}",
            p.goal_id,
            p.name.replace(',', ";"),
            p.target,
            p.monthly,
            p.start_period,
            p.months_to_completion
                .map(|m| m.to_string())
                .unwrap_or_default(),
            p.completion_period
                .map(|c| c.to_string())
                .unwrap_or_default()
        )
        .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    Ok(())
}
