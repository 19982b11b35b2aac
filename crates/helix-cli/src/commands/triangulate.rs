use anyhow::{Context, Result};
use clap::Args;
use helix_core::storage::HelixStore;

use super::{add_person, ensure_initialized, full_report, session};
use crate::output::format::format_triangulation;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct TriangulateArgs {
    /// First partner of the pair
    pub a: String,
    /// Second partner of the pair
    pub b: String,
    /// The third person
    pub c: String,
}

pub fn run(args: &TriangulateArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    ensure_initialized(store)?;
    let mut session = session();
    for name in [&args.a, &args.b, &args.c] {
        add_person(&mut session, store, name)?;
    }

    let report = full_report(&session)?;
    let friction = report
        .relationship
        .as_ref()
        .map(|r| r.friction.score)
        .context("Relationship report missing")?;
    let result = report
        .triangulation
        .context("Triangulation report missing")?;
    print!(
        "{}",
        format_triangulation([&args.a, &args.b, &args.c], friction, &result, format)
    );
    Ok(())
}
