//! Import and restore commands
//!
//! `import` reads a file in the exchange format (or a bank export sharing its
//! column names) and appends the entries it yields. `restore` replaces the
//! whole ledger with a full JSON or YAML export.

use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::export::{import_from_json, import_from_yaml};
use crate::services::{ImportSummary, LedgerService};
use crate::storage::BlobStore;

/// Handle the import command
pub fn handle_import_command<S: BlobStore>(
    service: &mut LedgerService<S>,
    file: &Path,
    dry_run: bool,
) -> TallyResult<()> {
    let bytes = std::fs::read(file)
        .map_err(|e| TallyError::Import(format!("Failed to read {}: {}", file.display(), e)))?;
    let text = String::from_utf8_lossy(&bytes);

    let summary = if dry_run {
        service.preview_import(&text)
    } else {
        service.import_text(&text)?
    };

    print!("{}", format_import_summary(&summary, dry_run));
    Ok(())
}

/// Handle the restore command
///
/// Refuses to overwrite a non-empty ledger unless `force` is set.
pub fn handle_restore_command<S: BlobStore>(
    service: &mut LedgerService<S>,
    file: &Path,
    force: bool,
) -> TallyResult<()> {
    if !service.state().is_empty() && !force {
        return Err(TallyError::Validation(
            "Ledger is not empty. Use --force to replace it".to_string(),
        ));
    }

    let text = std::fs::read_to_string(file)
        .map_err(|e| TallyError::Import(format!("Failed to read {}: {}", file.display(), e)))?;

    let is_yaml = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let export = if is_yaml {
        import_from_yaml(&text)?
    } else {
        import_from_json(&text)?
    };

    let state = export.into_state();
    let counts = (state.entries.len(), state.budgets.len(), state.goals.len());
    service.restore(state)?;

    println!(
        "Restored {} entries, {} budgets and {} goals from: {}",
        counts.0,
        counts.1,
        counts.2,
        file.display()
    );
    Ok(())
}

fn format_import_summary(summary: &ImportSummary, dry_run: bool) -> String {
    if !summary.schema.is_ok() {
        return format!("Nothing to import: {}.\n", summary.schema);
    }

    let mut output = String::new();
    if dry_run {
        output.push_str(&format!("Dry run: {} entries would be imported\n", summary.imported));
    } else {
        output.push_str(&format!("Imported {} entries\n", summary.imported));
    }
    output.push_str(&format!("  Rows read:        {}\n", summary.rows_read));
    output.push_str(&format!("  Rows skipped:     {}\n", summary.rows_skipped));
    output.push_str(&format!("  Already present:  {}\n", summary.duplicates));
    output
}
