use anyhow::{Context, Result};
use clap::Args;
use helix_core::storage::HelixStore;

use super::{add_person, ensure_initialized, full_report, session};
use crate::output::format::format_relationship;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct FrictionArgs {
    /// First person
    pub a: String,
    /// Second person
    pub b: String,
}

pub fn run(args: &FrictionArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    ensure_initialized(store)?;
    let mut session = session();
    add_person(&mut session, store, &args.a)?;
    add_person(&mut session, store, &args.b)?;

    let report = full_report(&session)?;
    let relationship = report
        .relationship
        .context("Relationship report missing")?;
    print!(
        "{}",
        format_relationship(&args.a, &args.b, &relationship, format)
    );
    Ok(())
}
