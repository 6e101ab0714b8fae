//! `loadout` - inspect builds against the engine's static data.
//!
//! Run with: `loadout --data <DIR> <command>`

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Fingerprint, Render, Resolve, Validate};

/// Stat resolution and talent rendering for character builds
#[derive(Parser)]
#[command(name = "loadout")]
#[command(about = "Evaluate character builds against static game data", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory with characters.ron, weapons.ron, effects.ron, tables.ron
    #[arg(long, global = true, env = "LOADOUT_DATA_DIR", default_value = "data")]
    data: PathBuf,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and validate the data directory
    Validate(Validate),

    /// Render every document of one or more builds
    Render(Render),

    /// Show which damage type a talent resolves to
    Resolve(Resolve),

    /// Print the stat context fingerprint of each build
    Fingerprint(Fingerprint),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for LOADOUT_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let Cli {
        data,
        log_file,
        command,
    } = Cli::parse();

    let _guard = logging::init(log_file.as_deref())?;

    match command {
        Command::Validate(cmd) => cmd.execute(&data),
        Command::Render(cmd) => cmd.execute(&data),
        Command::Resolve(cmd) => cmd.execute(&data),
        Command::Fingerprint(cmd) => cmd.execute(&data),
    }
}
