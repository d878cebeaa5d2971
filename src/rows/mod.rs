pub mod field;
pub mod number;

pub use field::extract_field;
pub use number::{parse_float, parse_int};

use std::io::{self, BufRead};

/// Reads input one line at a time into a single reused buffer.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    row: usize,
}

/// One input line with its 1-based row number.
pub struct Line<'a> {
    pub row: usize,
    pub bytes: &'a [u8],
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(4096),
            row: 0,
        }
    }

    /// Next line including its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<Line<'_>>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.row += 1;
        Ok(Some(Line {
            row: self.row,
            bytes: &self.buf,
        }))
    }
}
