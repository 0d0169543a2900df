//! CLI command for data export
//!
//! CSV writes the exchange format (entries only, re-importable). JSON and
//! YAML write a full snapshot of entries, budgets and goals.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;

use super::create_output_file;
use crate::export::{csv, json, yaml};
use crate::error::{TallyError, TallyResult};
use crate::services::LedgerService;
use crate::storage::BlobStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Exchange format (entries only)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Handle the export command
///
/// Without `--output` the file goes to the exports directory under a
/// date-stamped name. `-` writes to stdout.
pub fn handle_export_command<S: BlobStore>(
    service: &LedgerService<S>,
    exports_dir: &Path,
    output: Option<PathBuf>,
    format: ExportFormat,
    pretty: bool,
) -> TallyResult<()> {
    if output.as_deref() == Some(Path::new("-")) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_export(service, &mut handle, format, pretty)?;
        writeln!(handle).map_err(|e| TallyError::Export(e.to_string()))?;
        return Ok(());
    }

    let path = output.unwrap_or_else(|| exports_dir.join(default_filename(format)));
    let mut writer = create_output_file(&path)?;
    write_export(service, &mut writer, format, pretty)?;
    writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;

    let state = service.state();
    match format {
        ExportFormat::Csv => {
            println!("Exported {} entries to: {}", state.entries.len(), path.display());
        }
        ExportFormat::Json | ExportFormat::Yaml => {
            println!(
                "Exported {} entries, {} budgets and {} goals to: {}",
                state.entries.len(),
                state.budgets.len(),
                state.goals.len(),
                path.display()
            );
        }
    }

    Ok(())
}

fn write_export<S: BlobStore, W: Write>(
    service: &LedgerService<S>,
    writer: &mut W,
    format: ExportFormat,
    pretty: bool,
) -> TallyResult<()> {
    let state = service.state();
    match format {
        ExportFormat::Csv => csv::export_entries_csv(&state.entries, writer),
        ExportFormat::Json => json::export_full_json(state, writer, pretty),
        ExportFormat::Yaml => yaml::export_full_yaml(state, writer),
    }
}

fn default_filename(format: ExportFormat) -> String {
    let today = Local::now().date_naive();
    match format {
        ExportFormat::Csv => csv::suggested_filename(today),
        other => format!("tally-{}.{}", today.format("%Y-%m-%d"), other.extension()),
    }
}
