use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use helix_core::storage::{HelixStore, DATA_DIR};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "helix",
    version,
    about = "Structural readings from birth data, relationships and journal text"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Data directory (default: ./.helix)
    #[arg(long, global = true, env = "HELIX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = HelixStore::open(
        cli.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_DIR)),
    );

    match &cli.command {
        commands::Commands::Init(args) => commands::init::run(args, &store),
        commands::Commands::Person(args) => commands::person::run(args, &store, cli.format),
        commands::Commands::Blueprint(args) => commands::blueprint::run(args, &store, cli.format),
        commands::Commands::Friction(args) => commands::friction::run(args, &store, cli.format),
        commands::Commands::Triangulate(args) => {
            commands::triangulate::run(args, &store, cli.format)
        }
        commands::Commands::Journal(args) => commands::journal::run(args, &store, cli.format),
        commands::Commands::Echo(args) => commands::echo::run(args, &store, cli.format),
        commands::Commands::Signal(args) => commands::signal::run(args, cli.format),
        commands::Commands::Seda(args) => commands::seda::run(args, cli.format),
        commands::Commands::Version => commands::version::run(),
    }
}
