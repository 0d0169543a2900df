use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{
    handle_budget_command, handle_entry_command, handle_export_command, handle_goal_command,
    handle_import_command, handle_report_command, handle_restore_command, BudgetCommands,
    EntryCommands, ExportFormat, GoalCommands, ReportCommands,
};
use tally::config::{Settings, TallyPaths};
use tally::logging::init_tracing;
use tally::services::LedgerService;
use tally::storage::FileBlobStore;

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Tolerant bank-export importer and monthly budget summaries",
    long_about = "Tally keeps a personal ledger of income and expense entries. \
                  It imports loosely formatted CSV bank exports, tracks monthly \
                  category budgets and savings goals, and prints a dashboard \
                  summary from the command line."
)]
struct Cli {
    /// Log level for diagnostics on stderr (overrides the configured level)
    #[arg(long, global = true, env = "TALLY_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ledger entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Import entries from a CSV file
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Report what would be imported without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace the ledger with a full JSON or YAML export
    Restore {
        /// Path to the export file
        file: PathBuf,
        /// Overwrite a non-empty ledger
        #[arg(long)]
        force: bool,
    },

    /// Export the ledger
    Export {
        /// Output file ("-" for stdout, defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Category budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Reports and the dashboard summary
    #[command(subcommand)]
    Report(ReportCommands),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&settings.log_level));

    match cli.command {
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized Tally at: {}", paths.base_dir().display());
            println!();
            println!("Next steps:");
            println!("  tally import <bank-export.csv>");
            println!("  tally budget set groceries 400");
            println!("  tally report summary");
        }
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Trailing months:   {}", settings.trailing_months);
            println!("  Rolling window:    {}", settings.rolling_window);
            println!("  Catch-all label:   {}", settings.catch_all_category);
            println!("  Income label:      {}", settings.income_category);
            println!("  Log level:         {}", settings.log_level);
        }
        Some(command) => {
            let exports_dir = paths.exports_dir();
            let store = FileBlobStore::new(paths)?;
            let mut service = LedgerService::open(store, settings)?;

            match command {
                Commands::Entry(cmd) => handle_entry_command(&mut service, cmd)?,
                Commands::Import { file, dry_run } => {
                    handle_import_command(&mut service, &file, dry_run)?
                }
                Commands::Restore { file, force } => {
                    handle_restore_command(&mut service, &file, force)?
                }
                Commands::Export {
                    output,
                    format,
                    pretty,
                } => handle_export_command(&service, &exports_dir, output, format, pretty)?,
                Commands::Budget(cmd) => handle_budget_command(&mut service, cmd)?,
                Commands::Goal(cmd) => handle_goal_command(&mut service, cmd)?,
                Commands::Report(cmd) => handle_report_command(&service, cmd)?,
                Commands::Init | Commands::Config => {}
            }
        }
        None => {
            println!("Tally - bank-export importer and budget summaries");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally report summary' for this month's dashboard.");
        }
    }

    Ok(())
}
