//! cswave - turn one numeric column of a delimited text file into a mono WAV file.
//!
//! This module exposes the pipeline for library use and the CLI types for
//! tools like man page and completion generation.

use clap::{CommandFactory, Parser};

pub mod commands;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod progress;
pub mod rows;
pub mod verbosity;
pub mod wav;

pub use error::ConvertError;
pub use format::{Sample, SampleFormat};
pub use pipeline::{ConvertOptions, ConvertSummary, Converter, convert_file};
pub use progress::Progress;
pub use verbosity::Verbosity;

#[derive(Parser)]
#[command(name = "cswave")]
#[command(about = "Convert a column of delimited text into a mono PCM WAV file")]
#[command(version)]
pub struct Cli {
    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(flatten)]
    pub convert: commands::convert::ConvertArgs,
}

impl Cli {
    /// Get the clap Command for man page and completion generation.
    pub fn cmd() -> clap::Command {
        <Self as CommandFactory>::command()
    }
}
