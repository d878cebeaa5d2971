//! Peak normalization of float sample data already written to the output.
//!
//! The whole data region is held in memory: the peak is only known once every
//! sample has been seen.

use super::Stage;
use crate::error::{ConvertError, Result};
use std::io::{ErrorKind, Read, Write};

const FLOAT_BYTES: usize = 4;

/// Largest-magnitude sample, kept with its sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub index: usize,
    pub value: f32,
}

/// Read exactly `count` native-endian floats, retrying partial reads.
pub fn read_samples<R: Read>(reader: &mut R, count: usize) -> Result<Vec<f32>> {
    let stage = Stage::NormalizeReadback;
    let expected = count * FLOAT_BYTES;
    let mut bytes = vec![0u8; expected];
    let mut filled = 0;

    while filled < expected {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => {
                return Err(ConvertError::ShortRead {
                    stage,
                    read: filled,
                    expected,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => return Err(ConvertError::Io { stage, source }),
        }
    }

    Ok(bytes
        .chunks_exact(FLOAT_BYTES)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// First sample with the largest absolute value. An empty or all-zero buffer
/// yields a zero peak at index 0; NaN samples never win.
pub fn find_peak(samples: &[f32]) -> Peak {
    let mut peak = Peak {
        index: 0,
        value: 0.0,
    };
    for (index, &value) in samples.iter().enumerate() {
        if value.abs() > peak.value.abs() {
            peak = Peak { index, value };
        }
    }
    peak
}

/// Divide every sample by the peak magnitude. A zero peak leaves the
/// (necessarily zero) samples untouched.
pub fn rescale(samples: &mut [f32], peak: Peak) {
    let scale = peak.value.abs();
    if scale == 0.0 {
        return;
    }
    for sample in samples.iter_mut() {
        *sample /= scale;
    }
}

/// Write every sample, retrying partial writes. A write that makes no
/// progress is fatal.
pub fn write_samples<W: Write>(writer: &mut W, samples: &[f32]) -> Result<()> {
    let stage = Stage::NormalizeRewrite;
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_ne_bytes()).collect();
    let mut written = 0;

    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(ConvertError::ShortWrite {
                    stage,
                    written,
                    expected: bytes.len(),
                });
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => return Err(ConvertError::Io { stage, source }),
        }
    }

    writer.flush().map_err(ConvertError::io(stage))
}
