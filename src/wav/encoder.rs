use crate::format::{Sample, SampleFormat};
use std::io::{self, ErrorKind, Write};

/// Bytes of one encoded sample, 1 to 4 of them used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedSample {
    bytes: [u8; 4],
    len: usize,
}

impl EncodedSample {
    fn new(src: &[u8]) -> Self {
        let mut bytes = [0u8; 4];
        bytes[..src.len()].copy_from_slice(src);
        Self {
            bytes,
            len: src.len(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Encode a sample for `format`.
///
/// Integer formats keep the low-order bits of the 64-bit reading, little-endian.
/// Float formats write the 32-bit float bit pattern in native byte order.
pub fn encode_sample(sample: &Sample, format: SampleFormat) -> EncodedSample {
    match format {
        SampleFormat::I8 => EncodedSample::new(&[sample.int as u8]),
        SampleFormat::I16 => EncodedSample::new(&(sample.int as i16).to_le_bytes()),
        SampleFormat::I32 => EncodedSample::new(&(sample.int as i32).to_le_bytes()),
        SampleFormat::F32 | SampleFormat::Nf32 => {
            EncodedSample::new(&sample.float.to_ne_bytes())
        }
    }
}

/// Result of appending one sample.
#[derive(Debug)]
pub enum PushOutcome {
    Complete,
    Short { written: usize, expected: usize },
    Failed(io::Error),
}

/// Appends encoded samples to a stream, one write per sample.
///
/// Incomplete writes are reported back and counted but never abort.
pub struct SampleWriter<W> {
    inner: W,
    format: SampleFormat,
    pushed: u64,
    short_writes: u64,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W, format: SampleFormat) -> Self {
        Self {
            inner,
            format,
            pushed: 0,
            short_writes: 0,
        }
    }

    pub fn push(&mut self, sample: &Sample) -> PushOutcome {
        let encoded = encode_sample(sample, self.format);
        let expected = encoded.as_bytes().len();
        self.pushed += 1;

        let result = loop {
            match self.inner.write(encoded.as_bytes()) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        match result {
            Ok(written) if written == expected => PushOutcome::Complete,
            Ok(written) => {
                self.short_writes += 1;
                PushOutcome::Short { written, expected }
            }
            Err(e) => {
                self.short_writes += 1;
                PushOutcome::Failed(e)
            }
        }
    }

    /// Samples pushed so far, complete or not.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    pub fn short_writes(&self) -> u64 {
        self.short_writes
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
