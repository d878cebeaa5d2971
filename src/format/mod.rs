pub mod sample;
pub mod sample_format;

pub use sample::Sample;
pub use sample_format::{FORMAT_TAG_IEEE_FLOAT, FORMAT_TAG_PCM, SampleFormat};
