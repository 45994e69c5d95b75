//! typenames: keep a union-of-names declaration file in sync with a folder.
//!
//! # Usage
//!
//! ```text
//! typenames generate --watch-dir <dir> --suffix <.ext> [--dist-dir <dir>] [--template <file>] [--dry-run] [--json]
//! typenames generate [--config typenames.yaml] [--dry-run] [--json]
//! typenames watch    --watch-dir <dir> --suffix <.ext> [--dist-dir <dir>] [--template <file>] [--json]
//! typenames watch    [--config typenames.yaml] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{generate::GenerateArgs, watch::WatchArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "typenames",
    version,
    about = "Generate TypeScript name unions from the files in a folder",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan once and write every declaration file that is out of date.
    Generate(GenerateArgs),

    /// Keep declaration files up to date until interrupted.
    Watch(WatchArgs),
}

fn main() -> Result<()> {
    typenames_daemon::init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Watch(args) => args.run(),
    }
}
