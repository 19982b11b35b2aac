use anyhow::{Context, Result};
use clap::Args;
use helix_core::config::HelixConfig;
use helix_core::storage::HelixStore;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config with the defaults
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, store: &HelixStore) -> Result<()> {
    if store.is_initialized() && !args.force {
        println!(
            "Helix is already initialized in {}.",
            store.root().display()
        );
        println!("Use --force to reset the config.");
        return Ok(());
    }

    store.init().context("Failed to initialize data directory")?;
    if args.force {
        HelixConfig::default()
            .save(&store.config_path())
            .context("Failed to reset config")?;
    }

    println!("Helix initialized in {}.", store.root().display());
    println!();
    println!("Next steps:");
    println!("  helix person add <name> --date YYYY-MM-DD --time HH:MM   Store a birth record");
    println!("  helix blueprint <name>                                   Calculate a blueprint");
    println!("  helix journal add \"<text>\"                               Write a journal entry");
    Ok(())
}
