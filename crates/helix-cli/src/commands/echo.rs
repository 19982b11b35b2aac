use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use helix_core::model::HumanType;
use helix_core::storage::{EntryStore, HelixStore};
use tracing::debug;

use super::{add_person, ensure_initialized, full_report, session};
use crate::output::format::format_echo;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct EchoArgs {
    /// Primary archetype (generator, manifesting-generator, projector, manifestor, reflector)
    #[arg(long)]
    pub archetype: Option<HumanType>,

    /// Take the archetype from a stored person's blueprint
    #[arg(long, conflicts_with = "archetype")]
    pub person: Option<String>,

    /// Trailing window in days (default from config)
    #[arg(long)]
    pub days: Option<u32>,
}

pub fn run(args: &EchoArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    ensure_initialized(store)?;
    let config = store.config().context("Failed to load config")?;
    let entries = store.journal().load().context("Failed to load journal")?;
    debug!(entries = entries.len(), "Loaded journal");

    let mut session = session();
    if let Some(name) = &args.person {
        add_person(&mut session, store, name)?;
    } else {
        let archetype = args.archetype.or(config.default_archetype).context(
            "No archetype: pass --archetype, --person, or set default_archetype in config.toml",
        )?;
        session.archetype(archetype);
    }
    session
        .journal(entries)
        .window_days(args.days.unwrap_or(config.echo_window_days))
        .now(Utc::now());

    let report = full_report(&session)?;
    let echo = report.echo.context("Echo report missing")?;
    print!("{}", format_echo(&echo, format));
    Ok(())
}
