pub mod blueprint;
pub mod echo;
pub mod friction;
pub mod init;
pub mod journal;
pub mod person;
pub mod seda;
pub mod signal;
pub mod triangulate;
pub mod version;

use std::io::Read as _;

use anyhow::{Context, Result};
use clap::Subcommand;
use helix_core::storage::HelixStore;
use helix_sdk::{MeanElementEphemeris, Reading, ReadingReport, ReadingSession};
use tracing::debug;

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory with a default config
    Init(init::InitArgs),
    /// Manage stored birth records
    Person(person::PersonArgs),
    /// Calculate a blueprint for a stored person or a birth date
    Blueprint(blueprint::BlueprintArgs),
    /// Score the friction between two people
    Friction(friction::FrictionArgs),
    /// Classify a third person's role around a pair
    Triangulate(triangulate::TriangulateArgs),
    /// Manage journal entries
    Journal(journal::JournalArgs),
    /// Detect recurring loops in recent journal entries
    Echo(echo::EchoArgs),
    /// Read the charge of a message before replying
    Signal(signal::SignalArgs),
    /// Run the safety circuit breaker over a text
    Seda(seda::SedaArgs),
    /// Print version information
    Version,
}

pub(crate) fn ensure_initialized(store: &HelixStore) -> Result<()> {
    if !store.is_initialized() {
        anyhow::bail!("Helix is not initialized. Run `helix init` first.");
    }
    Ok(())
}

/// The argument itself, or stdin when it is `-`.
pub(crate) fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

pub(crate) fn session() -> ReadingSession<MeanElementEphemeris> {
    ReadingSession::begin(MeanElementEphemeris::new())
}

/// Run a session that carries no message, so the safety gate cannot trip.
pub(crate) fn full_report(session: &ReadingSession<MeanElementEphemeris>) -> Result<ReadingReport> {
    match session.run().context("Reading failed")? {
        Reading::Full(report) => Ok(*report),
        Reading::Crisis { directive, .. } => anyhow::bail!("{directive}"),
    }
}

/// Add a stored person to the session.
pub(crate) fn add_person(
    session: &mut ReadingSession<MeanElementEphemeris>,
    store: &HelixStore,
    name: &str,
) -> Result<()> {
    let person = store
        .people()
        .get(name)
        .with_context(|| format!("Failed to look up '{name}'"))?;
    debug!(name = %person.name, birth = %person.birth, "Loaded person");
    session.person(&person.name, person.birth);
    Ok(())
}
