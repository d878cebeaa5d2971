//! Progress indicator for the streaming stage.
//!
//! Respects verbosity settings - no progress in quiet mode.

use crate::Verbosity;
use indicatif::{ProgressBar, ProgressStyle};

/// A byte-count progress bar that respects verbosity settings.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a progress bar over `total` input bytes.
    pub fn new(total: u64, verbosity: Verbosity) -> Self {
        let bar = if verbosity.show_status() && total > 0 {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{bar:30.cyan/blue}] {bytes}/{total_bytes} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            pb.set_style(style);
            Some(pb)
        } else {
            None
        };
        Self { bar }
    }

    /// A progress handle that never draws anything.
    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(delta);
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(ref bar) = self.bar {
            bar.set_message(msg.into());
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, line: impl AsRef<str>) {
        match self.bar {
            Some(ref bar) => bar.suspend(|| eprintln!("{}", line.as_ref())),
            None => eprintln!("{}", line.as_ref()),
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
