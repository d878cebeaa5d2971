//! Print shell completions for cswave.
//!
//! Run with: cargo run --bin gen-completions -- bash > cswave.bash

use clap::Parser;
use clap_complete::{Shell, generate};
use std::io;

#[derive(Parser)]
#[command(name = "gen-completions")]
struct Args {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

fn main() {
    let args = Args::parse();
    let mut cmd = cswave::Cli::cmd();
    generate(args.shell, &mut cmd, "cswave", &mut io::stdout());
}
