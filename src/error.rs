use crate::pipeline::Stage;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to open input file {}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open output file {}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while {stage}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("Short read while {stage}: got {read} of {expected} bytes")]
    ShortRead {
        stage: Stage,
        read: usize,
        expected: usize,
    },

    #[error("Short write while {stage}: wrote {written} of {expected} bytes")]
    ShortWrite {
        stage: Stage,
        written: usize,
        expected: usize,
    },

    #[error("Output too large for a RIFF file: {samples} samples of {bytes_per_sample} bytes")]
    TooLarge { samples: u64, bytes_per_sample: usize },

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    #[error("Output verification failed: {0}")]
    Verify(String),
}

impl ConvertError {
    pub(crate) fn io(stage: Stage) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { stage, source }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
