use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use helix_core::model::BirthMoment;
use helix_core::storage::HelixStore;

use super::ensure_initialized;
use crate::output::format::format_people;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommand,
}

#[derive(Subcommand)]
pub enum PersonCommand {
    /// Store a birth record under a name
    Add(AddArgs),
    /// List stored people
    List,
    /// Remove a stored person
    Remove {
        /// Name (case-insensitive)
        name: String,
    },
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Birth time, 24-hour HH:MM (default 12:00)
    #[arg(long)]
    pub time: Option<String>,

    /// Minutes east of UTC for the birth clock (default from config)
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Replace an existing record with the same name
    #[arg(long)]
    pub replace: bool,
}

pub fn run(args: &PersonArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    ensure_initialized(store)?;
    let people = store.people();

    match &args.command {
        PersonCommand::Add(add) => {
            let config = store.config().context("Failed to load config")?;
            let birth = BirthMoment::parse(&add.date, add.time.as_deref())
                .and_then(|b| {
                    b.with_utc_offset(add.utc_offset.unwrap_or(config.utc_offset_minutes))
                })
                .context("Invalid birth data")?;
            let person = people
                .add(&add.name, birth, add.replace)
                .with_context(|| format!("Failed to add '{}'", add.name))?;
            println!("Stored {} ({}).", person.name, person.birth);
        }
        PersonCommand::List => {
            let all = people.list().context("Failed to list people")?;
            print!("{}", format_people(&all, format));
        }
        PersonCommand::Remove { name } => {
            let removed = people
                .remove(name)
                .with_context(|| format!("Failed to remove '{name}'"))?;
            println!("Removed {}.", removed.name);
        }
    }
    Ok(())
}
