use crate::rows::number::{parse_float, parse_int};

/// Both numeric readings of one extracted field.
///
/// The encoder picks whichever interpretation the output format needs; the
/// other one is computed anyway and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub int: i64,
    pub float: f32,
}

impl Sample {
    /// Parse a field leniently. Text that is not a number reads as zero.
    pub fn parse(field: &[u8]) -> Self {
        Self {
            int: parse_int(field),
            float: parse_float(field),
        }
    }
}
