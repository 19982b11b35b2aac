use anyhow::{Context, Result};
use clap::Args;
use helix_text::SafetyBreaker;

use super::read_text;
use crate::output::format::format_seda;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct SedaArgs {
    /// Text to assess (use `-` to read from stdin)
    pub text: String,
}

pub fn run(args: &SedaArgs, format: OutputFormat) -> Result<()> {
    let text = read_text(&args.text)?;
    let breaker = SafetyBreaker::shared().context("Failed to build safety term lists")?;
    print!("{}", format_seda(&breaker.assess(&text), format));
    Ok(())
}
