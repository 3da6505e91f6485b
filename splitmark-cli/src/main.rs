//! Splitmark command-line interface

use clap::Parser;
use splitmark_cli::commands::Commands;

/// Split styled paragraph streams into length-bounded, sentence-aligned chunks
#[derive(Debug, Parser)]
#[command(name = "splitmark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
