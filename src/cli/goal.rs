//! Goal CLI commands

use clap::Subcommand;

use super::{parse_amount_arg, parse_non_negative_arg, parse_period_arg};
use crate::error::{TallyError, TallyResult};
use crate::models::Goal;
use crate::reports::goals::format_projections_terminal;
use crate::reports::project_goals;
use crate::services::{LedgerService, NewGoal};
use crate::storage::BlobStore;

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Amount to save
        #[arg(short, long)]
        target: String,
        /// Planned monthly contribution
        #[arg(short, long, default_value = "0")]
        monthly: String,
        /// First contribution month (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        start: Option<String>,
    },

    /// List goals with projected completion
    #[command(alias = "ls")]
    List,

    /// Change a goal (omitted options keep their current value)
    Update {
        /// Goal ID or name
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long)]
        monthly: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Remove a goal
    #[command(alias = "rm")]
    Remove {
        /// Goal ID or name
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command<S: BlobStore>(
    service: &mut LedgerService<S>,
    cmd: GoalCommands,
) -> TallyResult<()> {
    let currency = service.settings().currency_symbol.clone();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            monthly,
            start,
        } => {
            let input = NewGoal {
                name,
                target: parse_amount_arg(&target)?,
                monthly: parse_non_negative_arg(&monthly)?,
                start_period: start.as_deref().map(parse_period_arg).transpose()?,
            };
            let goal = service.add_goal(input)?;

            println!("Created goal: {}", goal.name);
            println!("  ID: {}", goal.id);
            print_eta(&goal);
        }

        GoalCommands::List => {
            let projections = project_goals(&service.state().goals);
            print!("{}", format_projections_terminal(&projections, &currency));
        }

        GoalCommands::Update {
            goal,
            name,
            target,
            monthly,
            start,
        } => {
            let current = lookup(service, &goal)?.clone();

            let input = NewGoal {
                name: name.unwrap_or(current.name),
                target: match target {
                    Some(t) => parse_amount_arg(&t)?,
                    None => current.target,
                },
                monthly: match monthly {
                    Some(m) => parse_non_negative_arg(&m)?,
                    None => current.monthly,
                },
                start_period: Some(match start {
                    Some(s) => parse_period_arg(&s)?,
                    None => current.start_period,
                }),
            };
            let updated = service.update_goal(current.id, input)?;

            println!("Updated goal: {}", updated.name);
            print_eta(&updated);
        }

        GoalCommands::Remove { goal } => {
            let id = lookup(service, &goal)?.id;
            let removed = service.remove_goal(id)?;
            println!("Removed goal: {} ({})", removed.name, removed.id);
        }
    }

    Ok(())
}

fn lookup<'a, S: BlobStore>(service: &'a LedgerService<S>, identifier: &str) -> TallyResult<&'a Goal> {
    service
        .find_goal(identifier)
        .ok_or_else(|| TallyError::goal_not_found(identifier))
}

fn print_eta(goal: &Goal) {
    match (goal.months_to_completion(), goal.completion_period()) {
        (Some(months), Some(period)) => {
            println!("  Reached in {} months ({})", months, period);
        }
        _ => println!("  No ETA (monthly contribution is zero)"),
    }
}
