pub mod encoder;
pub mod header;
pub mod reader;

pub use encoder::{EncodedSample, PushOutcome, SampleWriter, encode_sample};
pub use header::WavHeader;
pub use reader::WavInfo;
