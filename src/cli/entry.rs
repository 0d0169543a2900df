//! Entry CLI commands
//!
//! Manual bookkeeping: add, list, show, edit and delete ledger entries.

use clap::Subcommand;

use super::{parse_amount_arg, parse_date_arg, parse_kind_arg, parse_period_arg};
use crate::display::{format_entry_details, format_entry_register};
use crate::error::{TallyError, TallyResult};
use crate::models::EntryId;
use crate::services::{EntryFilter, LedgerService, NewEntry};
use crate::storage::BlobStore;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a new entry
    Add {
        /// Amount (e.g., "42.50" or "1,200")
        amount: String,
        /// income or expense (also: in, out, credit, debit, +, -)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Only entries in this period (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
        /// Only income or only expense
        #[arg(short, long)]
        kind: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one entry
    Show {
        /// Entry ID
        id: String,
    },

    /// Replace an entry's fields (omitted options keep their current value)
    Edit {
        /// Entry ID
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Handle an entry command
pub fn handle_entry_command<S: BlobStore>(
    service: &mut LedgerService<S>,
    cmd: EntryCommands,
) -> TallyResult<()> {
    let currency = service.settings().currency_symbol.clone();

    match cmd {
        EntryCommands::Add {
            amount,
            kind,
            date,
            category,
            note,
        } => {
            let input = NewEntry {
                date: parse_date_arg(date.as_deref())?,
                kind: parse_kind_arg(&kind)?,
                amount: parse_amount_arg(&amount)?,
                category,
                note,
            };
            let entry = service.add_entry(input)?;

            println!("Added entry {}", entry.id);
            print!("{}", format_entry_details(&entry, &currency));
        }

        EntryCommands::List {
            period,
            kind,
            category,
            limit,
        } => {
            let mut filter = EntryFilter::new();
            if let Some(period) = period {
                filter = filter.period(parse_period_arg(&period)?);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind_arg(&kind)?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let entries = service.list_entries(&filter);
            print!(
                "{}",
                format_entry_register(&entries, &currency, &service.settings().date_format)
            );
        }

        EntryCommands::Show { id } => {
            let id = parse_entry_id(&id)?;
            let entry = service
                .get_entry(id)
                .ok_or_else(|| TallyError::entry_not_found(id.to_string()))?;
            print!("{}", format_entry_details(entry, &currency));
        }

        EntryCommands::Edit {
            id,
            amount,
            kind,
            date,
            category,
            note,
        } => {
            let id = parse_entry_id(&id)?;
            let current = service
                .get_entry(id)
                .ok_or_else(|| TallyError::entry_not_found(id.to_string()))?
                .clone();

            let input = NewEntry {
                date: match date {
                    Some(d) => parse_date_arg(Some(&d))?,
                    None => current.date,
                },
                kind: match kind {
                    Some(k) => parse_kind_arg(&k)?,
                    None => current.kind,
                },
                amount: match amount {
                    Some(a) => parse_amount_arg(&a)?,
                    None => current.amount.value(),
                },
                category: Some(category.unwrap_or(current.category)),
                note: Some(note.unwrap_or(current.note)),
            };
            let entry = service.edit_entry(id, input)?;

            println!("Updated entry {}", entry.id);
            print!("{}", format_entry_details(&entry, &currency));
        }

        EntryCommands::Delete { id } => {
            let id = parse_entry_id(&id)?;
            let removed = service.delete_entry(id)?;
            println!(
                "Deleted entry {} ({} {} on {})",
                removed.id,
                removed.kind,
                removed.amount.format_with_symbol(&currency),
                removed.date
            );
        }
    }

    Ok(())
}

fn parse_entry_id(id: &str) -> TallyResult<EntryId> {
    EntryId::parse(id)
        .ok_or_else(|| TallyError::Validation(format!("Invalid entry ID '{}'", id)))
}
