use anyhow::Result;
use clap::Parser;
use cswave::{Cli, Verbosity};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    cswave::commands::convert::run(cli.convert, verbosity)
}
