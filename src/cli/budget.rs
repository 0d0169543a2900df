//! Budget CLI commands
//!
//! Monthly caps per category label. Labels are free text; setting a cap for a
//! new label simply adds it.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use super::{create_output_file, parse_date_arg, parse_non_negative_arg};
use crate::display::format_budget_table;
use crate::error::{TallyError, TallyResult};
use crate::export::export_budgets_csv;
use crate::services::LedgerService;
use crate::storage::BlobStore;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set or replace a category's monthly cap
    Set {
        /// Category label
        category: String,
        /// Monthly cap (0 disables the usage ratio)
        cap: String,
    },

    /// Remove a category's cap
    #[command(alias = "rm")]
    Remove {
        /// Category label
        category: String,
    },

    /// List caps with this month's usage
    #[command(alias = "ls")]
    List {
        /// Reference date for usage (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Write caps to a CSV file
    Export {
        /// Output file
        output: PathBuf,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: BlobStore>(
    service: &mut LedgerService<S>,
    cmd: BudgetCommands,
) -> TallyResult<()> {
    let currency = service.settings().currency_symbol.clone();

    match cmd {
        BudgetCommands::Set { category, cap } => {
            let cap = parse_non_negative_arg(&cap)?;
            service.set_budget(&category, cap)?;
            println!("Budget for '{}' set to {}{:.2}", category.trim(), currency, cap);
        }

        BudgetCommands::Remove { category } => {
            let cap = service.remove_budget(&category)?;
            println!(
                "Removed budget for '{}' (was {}{:.2})",
                category.trim(),
                currency,
                cap
            );
        }

        BudgetCommands::List { date } => {
            let reference = parse_date_arg(date.as_deref())?;
            let summary = service.summary(reference);
            println!("Budgets: {}", summary.current_period);
            print!(
                "{}",
                format_budget_table(&service.state().budgets, &summary.budgets, &currency)
            );
        }

        BudgetCommands::Export { output } => {
            let mut writer = create_output_file(&output)?;
            export_budgets_csv(&service.state().budgets, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TallyError::Export(e.to_string()))?;
            println!(
                "Exported {} budgets to: {}",
                service.state().budgets.len(),
                output.display()
            );
        }
    }

    Ok(())
}
