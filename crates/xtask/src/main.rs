//! Development tasks for the visibility workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod logging;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{Clean, ReadSnapshot, Simulate};

/// Development tasks for the visibility workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the visibility engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write logs to the platform log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scenario and print each turn's visibility
    Simulate(Simulate),

    /// Read and inspect saved visibility snapshots
    ReadSnapshot(ReadSnapshot),

    /// Clean snapshots and logs
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file)?;

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::ReadSnapshot(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
