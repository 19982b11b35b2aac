use anyhow::{Context, Result};
use clap::Args;
use helix_core::model::BirthMoment;
use helix_core::storage::HelixStore;

use super::{add_person, ensure_initialized, full_report, session};
use crate::output::format::format_blueprint;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct BlueprintArgs {
    /// Stored person to calculate for
    #[arg(conflicts_with = "date")]
    pub name: Option<String>,

    /// Birth date (YYYY-MM-DD), instead of a stored person
    #[arg(long, required_unless_present = "name")]
    pub date: Option<String>,

    /// Birth time, 24-hour HH:MM (default 12:00)
    #[arg(long, requires = "date")]
    pub time: Option<String>,

    /// Minutes east of UTC for the birth clock
    #[arg(long, requires = "date", allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,
}

pub fn run(args: &BlueprintArgs, store: &HelixStore, format: OutputFormat) -> Result<()> {
    let mut session = session();

    match (&args.name, &args.date) {
        (Some(name), _) => {
            ensure_initialized(store)?;
            add_person(&mut session, store, name)?;
        }
        (None, Some(date)) => {
            let mut birth =
                BirthMoment::parse(date, args.time.as_deref()).context("Invalid birth data")?;
            if let Some(offset) = args.utc_offset {
                birth = birth.with_utc_offset(offset).context("Invalid birth data")?;
            }
            session.person("(unnamed)", birth);
        }
        (None, None) => anyhow::bail!("Give a stored name or --date"),
    }

    let report = full_report(&session)?;
    for named in &report.blueprints {
        print!("{}", format_blueprint(named, format));
    }
    Ok(())
}
