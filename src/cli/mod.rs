//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod entry;
pub mod export;
pub mod goal;
pub mod import;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportFormat};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::{handle_import_command, handle_restore_command};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::codec;
use crate::error::{TallyError, TallyResult};
use crate::models::{Amount, EntryKind, Period};

/// Parse a date argument in any accepted import format, today when absent
pub(crate) fn parse_date_arg(date: Option<&str>) -> TallyResult<NaiveDate> {
    match date {
        None => Ok(Local::now().date_naive()),
        Some(s) => codec::parse_date(s.trim()).ok_or_else(|| {
            TallyError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

/// Parse a `YYYY-MM` period argument
pub(crate) fn parse_period_arg(period: &str) -> TallyResult<Period> {
    Period::parse(period)
        .map_err(|e| TallyError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-01)", e)))
}

/// Parse an entry kind using the importer's vocabulary
pub(crate) fn parse_kind_arg(kind: &str) -> TallyResult<EntryKind> {
    kind.parse::<EntryKind>().map_err(TallyError::Validation)
}

/// Parse a positive amount ("1,250.50" and "$12" are accepted)
pub(crate) fn parse_amount_arg(amount: &str) -> TallyResult<f64> {
    Amount::parse(amount)
        .map(|a| a.value())
        .map_err(|e| TallyError::Validation(e.to_string()))
}

/// Parse a cap or contribution, where zero is allowed
pub(crate) fn parse_non_negative_arg(amount: &str) -> TallyResult<f64> {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err(TallyError::Validation(format!(
            "Amount cannot be negative: {}",
            amount
        ))),
        Err(_) => parse_amount_arg(amount),
    }
}

/// Create a buffered file for report or export output
pub(crate) fn create_output_file(path: &Path) -> TallyResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            TallyError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
