use crate::error::{ConvertError, Result};
use crate::format::SampleFormat;

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Everything the conversion needs besides the two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Zero-based column holding the sample values
    pub column: usize,
    pub sample_rate: u32,
    pub format: SampleFormat,
    pub delimiter: char,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            column: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            format: SampleFormat::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ConvertOptions {
    pub fn column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn format(mut self, format: SampleFormat) -> Self {
        self.format = format;
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The delimiter as a byte; input is scanned byte-wise.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConvertError::InvalidDelimiter(self.delimiter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.column, 0);
        assert_eq!(options.format, SampleFormat::I16);
        assert_eq!(options.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let options = ConvertOptions::default().delimiter('§');
        assert!(matches!(
            options.delimiter_byte(),
            Err(ConvertError::InvalidDelimiter('§'))
        ));
    }
}
