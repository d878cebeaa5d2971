use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// WAVE `fmt ` format tag for integer PCM.
pub const FORMAT_TAG_PCM: u16 = 1;
/// WAVE `fmt ` format tag for IEEE-754 float samples.
pub const FORMAT_TAG_IEEE_FLOAT: u16 = 3;

/// Encoding used for every sample of the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 8-bit unsigned integer PCM
    I8,
    /// 16-bit signed little-endian PCM
    #[default]
    I16,
    /// 32-bit signed little-endian PCM
    I32,
    /// 32-bit float, rescaled to [-1, 1] by peak after streaming
    F32,
    /// 32-bit float, written as parsed
    Nf32,
}

impl SampleFormat {
    pub const ALL: [SampleFormat; 5] = [Self::I8, Self::I16, Self::I32, Self::F32, Self::Nf32];

    /// Map a CLI token to a format. Missing or unknown tokens select 16-bit PCM.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            Some("i8") => Self::I8,
            Some("i32") => Self::I32,
            Some("f32") => Self::F32,
            Some("nf32") => Self::Nf32,
            _ => Self::I16,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::Nf32 => "nf32",
        }
    }

    pub fn bits_per_sample(self) -> u16 {
        match self {
            Self::I8 => 8,
            Self::I16 => 16,
            Self::I32 | Self::F32 | Self::Nf32 => 32,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        usize::from(self.bits_per_sample() / 8)
    }

    pub fn format_tag(self) -> u16 {
        if self.is_float() {
            FORMAT_TAG_IEEE_FLOAT
        } else {
            FORMAT_TAG_PCM
        }
    }

    /// Either float encoding. Float formats carry the 2-byte `fmt ` extension field.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::Nf32)
    }

    /// Only the plain `f32` format: it alone gets a `fact` chunk and the
    /// normalization pass. `nf32` deliberately does not match.
    pub fn is_float_normalized(self) -> bool {
        self == Self::F32
    }
}

impl FromStr for SampleFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(Some(s)))
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
