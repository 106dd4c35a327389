//! CLI entry point for inspecting arena levels

use arenagrid::io::cli::Cli;
use clap::Parser;

fn main() -> arenagrid::Result<()> {
    let cli = Cli::parse();
    let _ = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .try_init();
    cli.run(&mut std::io::stdout().lock())
}
