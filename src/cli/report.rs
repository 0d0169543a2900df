//! CLI commands for reports
//!
//! Every report is computed from the current ledger snapshot relative to a
//! reference date (today unless `--date` is given). With `--output` the
//! report is written as CSV instead of printed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::{create_output_file, parse_date_arg, parse_period_arg};
use crate::display::format_budget_table;
use crate::error::{TallyError, TallyResult};
use crate::models::Period;
use crate::reports::budget_usage::export_usage_csv;
use crate::reports::goals::{export_projections_csv, format_projections_terminal};
use crate::reports::monthly::export_series_csv;
use crate::reports::summary::format_series_terminal;
use crate::reports::{category_spend, monthly_series, project_goals};
use crate::services::LedgerService;
use crate::storage::BlobStore;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Dashboard: current month, trailing series, spending, budgets and goals
    #[command(alias = "dashboard")]
    Summary {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Export the monthly series to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income, expense and net per month
    Monthly {
        /// Last month of the series (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        period: Option<String>,

        /// Number of months (defaults to the configured trailing window)
        #[arg(short, long)]
        months: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense totals by category for one month
    Spending {
        /// Month to report on (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        period: Option<String>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget consumption for one month
    Budgets {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Goal completion projections
    Goals {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command<S: BlobStore>(
    service: &LedgerService<S>,
    cmd: ReportCommands,
) -> TallyResult<()> {
    let currency = service.settings().currency_symbol.as_str();
    let state = service.state();

    match cmd {
        ReportCommands::Summary { date, json, output } => {
            let summary = service.summary(parse_date_arg(date.as_deref())?);

            if let Some(path) = output {
                write_csv(&path, |w| summary.export_csv(w))?;
                println!("Summary exported to: {}", path.display());
            } else if json {
                let text = serde_json::to_string_pretty(&summary)
                    .map_err(|e| TallyError::Json(e.to_string()))?;
                println!("{}", text);
            } else {
                print!("{}", summary.format_terminal(currency));
            }
        }

        ReportCommands::Monthly {
            period,
            months,
            output,
        } => {
            let end = period_or_current(period)?;
            let count = months.unwrap_or(service.settings().trailing_months).max(1);
            let series = monthly_series(&state.entries, &Period::trailing(end, count));

            if let Some(path) = output {
                write_csv(&path, |w| export_series_csv(&series, w))?;
                println!("Monthly report exported to: {}", path.display());
            } else {
                print!("{}", format_series_terminal(&series, currency));
            }
        }

        ReportCommands::Spending {
            period,
            top,
            output,
        } => {
            let period = period_or_current(period)?;
            let mut spend = category_spend(
                &state.entries,
                period,
                &service.settings().catch_all_category,
            );
            if let Some(n) = top {
                spend.categories.truncate(n);
            }

            if let Some(path) = output {
                write_csv(&path, |w| spend.export_csv(w))?;
                println!("Spending report exported to: {}", path.display());
            } else {
                print!("{}", spend.format_terminal(currency));
            }
        }

        ReportCommands::Budgets { date, output } => {
            let summary = service.summary(parse_date_arg(date.as_deref())?);

            if let Some(path) = output {
                write_csv(&path, |w| export_usage_csv(&summary.budgets, w))?;
                println!("Budget report exported to: {}", path.display());
            } else {
                println!("Budgets: {}", summary.current_period);
                print!(
                    "{}",
                    format_budget_table(&state.budgets, &summary.budgets, currency)
                );
            }
        }

        ReportCommands::Goals { output } => {
            let projections = project_goals(&state.goals);

            if let Some(path) = output {
                write_csv(&path, |w| export_projections_csv(&projections, w))?;
                println!("Goal report exported to: {}", path.display());
            } else {
                print!("{}", format_projections_terminal(&projections, currency));
            }
        }
    }

    Ok(())
}

fn period_or_current(period: Option<String>) -> TallyResult<Period> {
    match period {
        Some(p) => parse_period_arg(&p),
        None => Ok(Period::current()),
    }
}

fn write_csv<F>(path: &Path, export: F) -> TallyResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> TallyResult<()>,
{
    let mut writer = create_output_file(path)?;
    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))
}
