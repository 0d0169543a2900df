//! YAML Export functionality
//!
//! Exports the complete ledger to YAML format for human-readable backup.

use crate::error::{TallyError, TallyResult};
use crate::export::json::FullExport;
use crate::state::AppState;
use std::io::Write;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(state: &AppState, writer: &mut W) -> TallyResult<()> {
    let export = FullExport::from_state(state);

    writeln!(writer, "# Tally Full Ledger Export").map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> TallyResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| TallyError::Import(e.to_string()))?;

    export.validate().map_err(TallyError::Import)?;

    Ok(export)
}
