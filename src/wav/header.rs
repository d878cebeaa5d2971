//! RIFF/WAVE header serialization.
//!
//! Layout, all multi-byte fields little-endian:
//!
//! ```text
//! RIFF  "RIFF" | riff size u32 | "WAVE"
//! fmt   "fmt " | 16 or 18 u32 | tag u16 | channels u16 | rate u32
//!       | byte rate u32 | block align u16 | bits u16 | [ext size u16, floats only]
//! fact  "fact" | 4 u32 | sample count u32          (f32 only)
//! data  "data" | data size u32
//! ```
//!
//! The header length depends only on the sample format, so a provisional
//! header can be overwritten in place once the sample count is known.

use crate::error::{ConvertError, Result};
use crate::format::SampleFormat;
use std::io::{self, Write};

pub const CHANNELS: u16 = 1;

const RIFF_HEADER_LEN: usize = 12;
const FMT_BASE_LEN: u32 = 16;
const FMT_EXT_LEN: u32 = 18;
const FACT_CHUNK_LEN: usize = 12;
const DATA_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub format: SampleFormat,
    pub sample_count: u32,
    pub sample_rate: u32,
}

impl WavHeader {
    pub fn new(format: SampleFormat, sample_count: u32, sample_rate: u32) -> Self {
        Self {
            format,
            sample_count,
            sample_rate,
        }
    }

    /// Header for `samples` samples, failing if the data would overflow the
    /// 32-bit RIFF size field.
    pub fn for_samples(format: SampleFormat, samples: u64, sample_rate: u32) -> Result<Self> {
        let too_large = || ConvertError::TooLarge {
            samples,
            bytes_per_sample: format.bytes_per_sample(),
        };
        let data_len = samples
            .checked_mul(format.bytes_per_sample() as u64)
            .ok_or_else(too_large)?;
        let riff_size = data_len + (Self::len_for(format) - 8) as u64;
        if riff_size > u64::from(u32::MAX) {
            return Err(too_large());
        }
        Ok(Self::new(format, samples as u32, sample_rate))
    }

    /// Total header length in bytes for `format`; the data region starts here.
    pub fn len_for(format: SampleFormat) -> usize {
        let fact = if format.is_float_normalized() {
            FACT_CHUNK_LEN
        } else {
            0
        };
        RIFF_HEADER_LEN + 8 + Self::fmt_size(format) as usize + fact + DATA_HEADER_LEN
    }

    pub fn byte_len(&self) -> usize {
        Self::len_for(self.format)
    }

    fn fmt_size(format: SampleFormat) -> u32 {
        if format.is_float() {
            FMT_EXT_LEN
        } else {
            FMT_BASE_LEN
        }
    }

    pub fn has_fact_chunk(&self) -> bool {
        self.format.is_float_normalized()
    }

    pub fn data_size(&self) -> u32 {
        self.sample_count
            .wrapping_mul(self.format.bytes_per_sample() as u32)
    }

    /// Value of the RIFF size field: everything after the first 8 bytes.
    pub fn riff_size(&self) -> u32 {
        (self.byte_len() as u32 - 8).wrapping_add(self.data_size())
    }

    pub fn byte_rate(&self) -> u32 {
        (u64::from(self.sample_rate) * u64::from(self.format.bits_per_sample()) / 8) as u32
    }

    pub fn block_align(&self) -> u16 {
        self.format.bits_per_sample() / 8
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let format = self.format;
        let mut bytes = Vec::with_capacity(self.byte_len());

        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&self.riff_size().to_le_bytes());
        bytes.extend_from_slice(b"WAVE");

        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&Self::fmt_size(format).to_le_bytes());
        bytes.extend_from_slice(&format.format_tag().to_le_bytes());
        bytes.extend_from_slice(&CHANNELS.to_le_bytes());
        bytes.extend_from_slice(&self.sample_rate.to_le_bytes());
        bytes.extend_from_slice(&self.byte_rate().to_le_bytes());
        bytes.extend_from_slice(&self.block_align().to_le_bytes());
        bytes.extend_from_slice(&format.bits_per_sample().to_le_bytes());
        if format.is_float() {
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }

        if self.has_fact_chunk() {
            bytes.extend_from_slice(b"fact");
            bytes.extend_from_slice(&4u32.to_le_bytes());
            bytes.extend_from_slice(&self.sample_count.to_le_bytes());
        }

        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&self.data_size().to_le_bytes());

        debug_assert_eq!(bytes.len(), self.byte_len());
        bytes
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}
