use crate::Verbosity;
use crate::format::SampleFormat;
use crate::pipeline::{self, ConvertOptions};
use crate::wav::WavInfo;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Delimited text file to read rows from
    pub input: PathBuf,

    /// WAV file to create (overwritten if it exists)
    pub output: PathBuf,

    /// Zero-based column holding the sample values
    pub column: usize,

    /// Sample rate written to the WAV header, in Hz
    pub sample_rate: u32,

    /// Sample format: i8, i16, i32, f32 (normalized) or nf32 (not normalized).
    /// Anything else selects i16
    pub format: Option<String>,

    /// Field delimiter, a single ASCII character
    #[arg(default_value_t = pipeline::options::DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Re-read the finished file with a WAV decoder and check its header
    #[arg(long)]
    pub verify: bool,
}

impl ConvertArgs {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions::default()
            .column(self.column)
            .sample_rate(self.sample_rate)
            .format(SampleFormat::parse(self.format.as_deref()))
            .delimiter(self.delimiter)
    }
}

pub fn run(args: ConvertArgs, verbosity: Verbosity) -> Result<()> {
    let options = args.options();
    let format = options.format;
    let sample_rate = options.sample_rate;

    if verbosity.show_detail() {
        eprintln!(
            "Converting column {} of {} to {} at {} Hz ({})",
            options.column,
            args.input.display(),
            args.output.display(),
            sample_rate,
            format
        );
    }

    let summary = pipeline::convert_file(&args.input, &args.output, options, verbosity)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if verbosity.show_status() {
        let skipped = summary.skipped_rows;
        eprintln!(
            "Wrote {} samples to {}{}",
            summary.samples,
            args.output.display(),
            if skipped > 0 {
                format!(" ({} row{} skipped)", skipped, if skipped == 1 { "" } else { "s" })
            } else {
                String::new()
            }
        );
        if summary.short_writes > 0 {
            eprintln!("Warning: {} samples were not fully written", summary.short_writes);
        }
    }

    if args.verify {
        let info = WavInfo::open(&args.output)?;
        info.check(format, sample_rate, summary.samples)?;
        if verbosity.show_status() {
            eprintln!("Verified: {}", info);
        }
    }

    Ok(())
}
