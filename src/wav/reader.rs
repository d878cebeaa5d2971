use crate::error::{ConvertError, Result};
use crate::format::SampleFormat;
use crate::wav::header::CHANNELS;
use hound::{SampleFormat as HoundFormat, WavSpec};
use std::fmt;
use std::path::Path;

/// What a generic WAVE decoder sees in a produced file.
#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    pub spec: WavSpec,
    pub samples: u32,
}

impl WavInfo {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = hound::WavReader::open(path).map_err(|e| {
            ConvertError::Verify(format!("{} is not readable: {}", path.display(), e))
        })?;
        Ok(Self {
            spec: reader.spec(),
            samples: reader.len(),
        })
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.spec.sample_rate == 0 {
            return 0.0;
        }
        self.samples as f64 / self.spec.channels as f64 / self.spec.sample_rate as f64
    }

    /// Confirm the decoder agrees with what the pipeline wrote.
    pub fn check(&self, format: SampleFormat, sample_rate: u32, samples: u64) -> Result<()> {
        let expected_kind = if format.is_float() {
            HoundFormat::Float
        } else {
            HoundFormat::Int
        };

        let mut problems = Vec::new();
        if self.spec.channels != CHANNELS {
            problems.push(format!("{} channels", self.spec.channels));
        }
        if self.spec.sample_rate != sample_rate {
            problems.push(format!(
                "sample rate {} (expected {})",
                self.spec.sample_rate, sample_rate
            ));
        }
        if self.spec.bits_per_sample != format.bits_per_sample() {
            problems.push(format!(
                "{} bits per sample (expected {})",
                self.spec.bits_per_sample,
                format.bits_per_sample()
            ));
        }
        if self.spec.sample_format != expected_kind {
            problems.push(format!("{:?} samples", self.spec.sample_format));
        }
        if u64::from(self.samples) != samples {
            problems.push(format!("{} samples (expected {})", self.samples, samples));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::Verify(problems.join(", ")))
        }
    }
}

impl fmt::Display for WavInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.spec.sample_format {
            HoundFormat::Int => "int",
            HoundFormat::Float => "float",
        };
        write!(
            f,
            "{} ch, {} Hz, {}-bit {}, {} samples ({:.3}s)",
            self.spec.channels,
            self.spec.sample_rate,
            self.spec.bits_per_sample,
            kind,
            self.samples,
            self.duration_seconds()
        )
    }
}
