use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};
use helix_core::model::{EchoEntry, Spectrum};
use helix_core::storage::{EntryStore, HelixStore};

use super::{ensure_initialized, read_text};
use crate::output::format::format_entries;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct JournalArgs {
    #[command(subcommand)]
    pub command: JournalCommand,
}

#[derive(Subcommand)]
pub enum JournalCommand {
    /// Write an entry (use `-` to read from stdin)
    Add {
        text: String,

        /// Tag the entry with a spectrum
        #[arg(long)]
        spectrum: Option<SpectrumArg>,
    },
    /// List entries, newest first
    List {
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Remove an entry by id or unique prefix
    Remove { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpectrumArg {
    Entropy,
    Integration,
    Expansion,
}

impl From<SpectrumArg> for Spectrum {
    fn from(arg: SpectrumArg) -> Self {
        match arg {
            SpectrumArg::Entropy => Spectrum::Entropy,
            SpectrumArg::Integration => Spectrum::Integration,
            SpectrumArg::Expansion => Spectrum::Expansion,
        }
    }
}

pub fn run(args: &JournalArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    ensure_initialized(store)?;
    let journal = store.journal();

    match &args.command {
        JournalCommand::Add { text, spectrum } => {
            let text = read_text(text)?;
            if text.trim().is_empty() {
                anyhow::bail!("Journal entry is empty");
            }
            let mut entry = EchoEntry::new(text.trim(), Utc::now());
            if let Some(spectrum) = spectrum {
                entry = entry.with_spectrum((*spectrum).into());
            }
            let id = entry.id.clone();
            journal.append(entry).context("Failed to save entry")?;
            println!("Entry {} saved.", &id[..8.min(id.len())]);
        }
        JournalCommand::List { limit } => {
            let mut entries = journal.load().context("Failed to load journal")?;
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            entries.truncate(*limit);
            print!("{}", format_entries(&entries, format));
        }
        JournalCommand::Remove { id } => {
            let removed = journal
                .remove(id)
                .with_context(|| format!("Failed to remove entry '{id}'"))?;
            println!("Removed entry {}.", &removed.id[..8.min(removed.id.len())]);
        }
    }
    Ok(())
}
