use anyhow::{Context, Result};
use clap::Args;
use helix_sdk::Reading;

use super::{read_text, session};
use crate::output::format::{format_crisis, format_signal};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct SignalArgs {
    /// Message text (use `-` to read from stdin)
    pub text: String,
}

pub fn run(args: &SignalArgs, format: OutputFormat) -> Result<()> {
    let text = read_text(&args.text)?;
    let mut session = session();
    session.message(&text);

    match session.run().context("Signal analysis failed")? {
        Reading::Crisis { safety, .. } => print!("{}", format_crisis(&safety, format)),
        Reading::Full(report) => {
            let signal = report.signal.context("Signal report missing")?;
            print!("{}", format_signal(&signal, report.safety.as_ref(), format));
        }
    }
    Ok(())
}
