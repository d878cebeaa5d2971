//! Row-to-sample conversion.
//!
//! The output is written in up to three passes over the same handle: a
//! provisional header, the streamed samples, then the final header once the
//! sample count is known. The normalizing float format adds a read-back,
//! rescale and rewrite of the whole data region.

pub mod normalize;
pub mod options;

pub use normalize::Peak;
pub use options::ConvertOptions;

use crate::error::{ConvertError, Result};
use crate::format::Sample;
use crate::progress::Progress;
use crate::rows::{LineReader, extract_field};
use crate::verbosity::Verbosity;
use crate::wav::{PushOutcome, SampleWriter, WavHeader};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    HeaderProvisional,
    Streaming,
    HeaderFinal,
    Passthrough,
    NormalizeReadback,
    NormalizeRescale,
    HeaderRenormalized,
    NormalizeRewrite,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Init => "opening files",
            Self::HeaderProvisional => "writing the provisional header",
            Self::Streaming => "streaming samples",
            Self::HeaderFinal => "writing the final header",
            Self::Passthrough => "finishing without normalization",
            Self::NormalizeReadback => "reading samples back for normalization",
            Self::NormalizeRescale => "rescaling samples",
            Self::HeaderRenormalized => "rewriting the header after normalization",
            Self::NormalizeRewrite => "writing normalized samples",
            Self::Done => "closing files",
        };
        f.write_str(text)
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub header: WavHeader,
    pub samples: u64,
    /// Rows that had no value in the selected column
    pub skipped_rows: u64,
    pub short_writes: u64,
    /// Set only when the normalization pass ran
    pub peak: Option<Peak>,
    /// Stages visited, in order
    pub stages: Vec<Stage>,
}

pub struct Converter {
    options: ConvertOptions,
    verbosity: Verbosity,
}

struct Streamed {
    samples: u64,
    skipped_rows: u64,
    short_writes: u64,
}

impl Converter {
    pub fn new(options: ConvertOptions, verbosity: Verbosity) -> Self {
        Self { options, verbosity }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn run<R, F>(&self, input: R, output: &mut F) -> Result<ConvertSummary>
    where
        R: BufRead,
        F: Read + Write + Seek,
    {
        self.run_with_progress(input, output, &Progress::hidden())
    }

    pub fn run_with_progress<R, F>(
        &self,
        input: R,
        output: &mut F,
        progress: &Progress,
    ) -> Result<ConvertSummary>
    where
        R: BufRead,
        F: Read + Write + Seek,
    {
        let format = self.options.format;
        let rate = self.options.sample_rate;
        let mut stages = Vec::new();
        self.enter(&mut stages, Stage::Init);
        let delimiter = self.options.delimiter_byte()?;

        self.enter(&mut stages, Stage::HeaderProvisional);
        WavHeader::new(format, 0, rate)
            .write_to(output)
            .map_err(ConvertError::io(Stage::HeaderProvisional))?;

        self.enter(&mut stages, Stage::Streaming);
        let streamed = self.stream(input, output, delimiter, progress)?;

        self.enter(&mut stages, Stage::HeaderFinal);
        let header = WavHeader::for_samples(format, streamed.samples, rate)?;
        rewrite_header(output, &header, Stage::HeaderFinal)?;
        if self.verbosity.show_status() {
            progress.println(format!(
                "Finalizing output file ({} samples)",
                streamed.samples
            ));
        }

        let peak = if format.is_float_normalized() {
            Some(self.normalize(output, &header, &mut stages, progress)?)
        } else {
            self.enter(&mut stages, Stage::Passthrough);
            output.flush().map_err(ConvertError::io(Stage::Passthrough))?;
            None
        };

        self.enter(&mut stages, Stage::Done);
        Ok(ConvertSummary {
            header,
            samples: streamed.samples,
            skipped_rows: streamed.skipped_rows,
            short_writes: streamed.short_writes,
            peak,
            stages,
        })
    }

    fn enter(&self, stages: &mut Vec<Stage>, stage: Stage) {
        if self.verbosity.show_detail() {
            eprintln!("[{:?}] {}", stage, stage);
        }
        stages.push(stage);
    }

    fn stream<R, W>(
        &self,
        input: R,
        output: &mut W,
        delimiter: u8,
        progress: &Progress,
    ) -> Result<Streamed>
    where
        R: BufRead,
        W: Write,
    {
        let stage = Stage::Streaming;
        let show = self.verbosity.show_status();
        let mut sink = SampleWriter::new(output, self.options.format);
        let mut lines = LineReader::new(input);
        let mut skipped_rows = 0;

        while let Some(line) = lines.next_line().map_err(ConvertError::io(stage))? {
            progress.inc(line.bytes.len() as u64);

            let Some(field) = extract_field(line.bytes, self.options.column, delimiter) else {
                skipped_rows += 1;
                if show {
                    progress.println(format!(
                        "Input row {} does not provide a sample column",
                        line.row
                    ));
                }
                continue;
            };

            match sink.push(&Sample::parse(field)) {
                PushOutcome::Complete => {}
                PushOutcome::Short { written, expected } if show => {
                    progress.println(format!(
                        "Short write for row {}: {} of {} bytes",
                        line.row, written, expected
                    ));
                }
                PushOutcome::Failed(e) if show => {
                    progress.println(format!("Failed to write sample for row {}: {}", line.row, e));
                }
                PushOutcome::Short { .. } | PushOutcome::Failed(_) => {}
            }
        }

        Ok(Streamed {
            samples: sink.pushed(),
            skipped_rows,
            short_writes: sink.short_writes(),
        })
    }

    fn normalize<F>(
        &self,
        output: &mut F,
        header: &WavHeader,
        stages: &mut Vec<Stage>,
        progress: &Progress,
    ) -> Result<Peak>
    where
        F: Read + Write + Seek,
    {
        self.enter(stages, Stage::NormalizeReadback);
        output
            .seek(SeekFrom::Start(header.byte_len() as u64))
            .map_err(ConvertError::io(Stage::NormalizeReadback))?;
        let mut buffer = normalize::read_samples(output, header.sample_count as usize)?;

        self.enter(stages, Stage::NormalizeRescale);
        let peak = normalize::find_peak(&buffer);
        if self.verbosity.show_status() {
            progress.println(format!(
                "Determined maximum sample value as {} (sample {})",
                peak.value, peak.index
            ));
        }
        normalize::rescale(&mut buffer, peak);

        self.enter(stages, Stage::HeaderRenormalized);
        rewrite_header(output, header, Stage::HeaderRenormalized)?;

        self.enter(stages, Stage::NormalizeRewrite);
        normalize::write_samples(output, &buffer)?;

        Ok(peak)
    }
}

fn rewrite_header<F: Write + Seek>(output: &mut F, header: &WavHeader, stage: Stage) -> Result<()> {
    output
        .seek(SeekFrom::Start(0))
        .map_err(ConvertError::io(stage))?;
    header.write_to(output).map_err(ConvertError::io(stage))
}

/// Convert the file at `input` into a WAV file at `output`.
///
/// The output is created or truncated and opened for both reading and writing.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: ConvertOptions,
    verbosity: Verbosity,
) -> Result<ConvertSummary> {
    let source = File::open(input).map_err(|source| ConvertError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let total_bytes = source.metadata().map(|m| m.len()).unwrap_or(0);

    let mut sink = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(output)
        .map_err(|source| ConvertError::CreateOutput {
            path: output.to_path_buf(),
            source,
        })?;

    let progress = Progress::new(total_bytes, verbosity);
    let converter = Converter::new(options, verbosity);
    let result = converter.run_with_progress(BufReader::new(source), &mut sink, &progress);
    progress.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SampleFormat;
    use std::io::Cursor;

    fn convert(rows: &str, options: ConvertOptions) -> (ConvertSummary, Vec<u8>) {
        let mut output = Cursor::new(Vec::new());
        let summary = Converter::new(options, Verbosity::Quiet)
            .run(Cursor::new(rows.as_bytes()), &mut output)
            .unwrap();
        (summary, output.into_inner())
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes(c.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn test_i16_scenario() {
        let options = ConvertOptions::default().column(1).sample_rate(8000);
        let (summary, bytes) = convert("a,10\nb,20\nc,30\n", options);

        assert_eq!(summary.samples, 3);
        assert_eq!(bytes.len(), 44 + 6);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 6);
        assert_eq!(u32_at(&bytes, 24), 8000);
        assert_eq!(u32_at(&bytes, 40), 6);
        assert_eq!(&bytes[44..], &[10, 0, 20, 0, 30, 0]);
        assert_eq!(summary.peak, None);
    }

    #[test]
    fn test_stage_order_without_normalization() {
        let (summary, _) = convert("1\n", ConvertOptions::default());
        assert_eq!(
            summary.stages,
            vec![
                Stage::Init,
                Stage::HeaderProvisional,
                Stage::Streaming,
                Stage::HeaderFinal,
                Stage::Passthrough,
                Stage::Done,
            ]
        );
    }

    #[test]
    fn test_stage_order_with_normalization() {
        let options = ConvertOptions::default().format(SampleFormat::F32);
        let (summary, _) = convert("1\n", options);
        assert_eq!(
            summary.stages,
            vec![
                Stage::Init,
                Stage::HeaderProvisional,
                Stage::Streaming,
                Stage::HeaderFinal,
                Stage::NormalizeReadback,
                Stage::NormalizeRescale,
                Stage::HeaderRenormalized,
                Stage::NormalizeRewrite,
                Stage::Done,
            ]
        );
    }

    #[test]
    fn test_skipped_rows_do_not_count() {
        let options = ConvertOptions::default().column(1);
        let (summary, bytes) = convert("a,1\nb\nc,\nd,4\n", options);
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.skipped_rows, 2);
        assert_eq!(u32_at(&bytes, 40), 4);
        assert_eq!(&bytes[44..], &[1, 0, 4, 0]);
    }

    #[test]
    fn test_normalized_float_scenario() {
        let options = ConvertOptions::default().format(SampleFormat::F32);
        let (summary, bytes) = convert("5.0\n-10.0\n2.5\n", options);

        assert_eq!(bytes.len(), 58 + 12);
        assert_eq!(&bytes[38..42], b"fact");
        assert_eq!(u32_at(&bytes, 46), 3);
        assert_eq!(u32_at(&bytes, 54), 12);

        let samples = floats(&bytes[58..]);
        assert_eq!(samples, vec![0.5, -1.0, 0.25]);
        let max = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert_eq!(max, 1.0);
        assert_eq!(summary.peak, Some(Peak { index: 1, value: -10.0 }));
    }

    #[test]
    fn test_plain_float_keeps_parsed_values() {
        let options = ConvertOptions::default().format(SampleFormat::Nf32);
        let (summary, bytes) = convert("5.0\n-10.0\n2.5\n", options);

        assert_eq!(bytes.len(), 46 + 12);
        assert!(!bytes[..46].windows(4).any(|w| w == b"fact"));
        let mut expected = Vec::new();
        for v in [5.0f32, -10.0, 2.5] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(&bytes[46..], expected.as_slice());
        assert_eq!(summary.peak, None);
    }

    #[test]
    fn test_empty_input_yields_valid_empty_file() {
        for format in SampleFormat::ALL {
            let options = ConvertOptions::default().format(format);
            let (summary, bytes) = convert("", options);
            assert_eq!(summary.samples, 0, "{format}");
            assert_eq!(bytes.len(), WavHeader::len_for(format), "{format}");
        }
    }

    #[test]
    fn test_all_zero_normalization_stays_zero() {
        let options = ConvertOptions::default().format(SampleFormat::F32);
        let (_, bytes) = convert("0\n0.0\n-0\n", options);
        let samples = floats(&bytes[58..]);
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_custom_delimiter_and_i8() {
        let options = ConvertOptions::default()
            .column(2)
            .delimiter(';')
            .format(SampleFormat::I8);
        let (summary, bytes) = convert("x;y;200\nx;y;-1\nx;y;0x101\n", options);
        assert_eq!(summary.samples, 3);
        assert_eq!(&bytes[44..], &[200, 255, 1]);
    }

    #[test]
    fn test_i32_and_garbage_rows() {
        let options = ConvertOptions::default().format(SampleFormat::I32);
        let (summary, bytes) = convert("70000\nhello\n-1\n", options);
        assert_eq!(summary.samples, 3);
        let mut expected = Vec::new();
        for v in [70000i32, 0, -1] {
            expected.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(&bytes[44..], expected.as_slice());
    }

    /// Seekable output that stores at most `capacity` bytes; writes past it
    /// are cut short, then fail once nothing fits.
    struct FullDisk {
        inner: Cursor<Vec<u8>>,
        capacity: usize,
    }

    impl FullDisk {
        fn new(capacity: usize) -> Self {
            Self {
                inner: Cursor::new(Vec::new()),
                capacity,
            }
        }
    }

    impl Read for FullDisk {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let room = self.capacity.saturating_sub(self.inner.position() as usize);
            if room == 0 && !buf.is_empty() {
                return Err(std::io::Error::other("no space left"));
            }
            self.inner.write(&buf[..buf.len().min(room)])
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_streaming_write_failures_are_not_fatal() {
        let mut output = FullDisk::new(44 + 3);
        let summary = Converter::new(ConvertOptions::default(), Verbosity::Quiet)
            .run(Cursor::new(b"1\n2\n3\n".as_slice()), &mut output)
            .unwrap();

        assert_eq!(summary.samples, 3);
        assert_eq!(summary.short_writes, 2);
        assert_eq!(summary.stages.last(), Some(&Stage::Done));

        let bytes = output.inner.into_inner();
        assert_eq!(bytes.len(), 47);
        assert_eq!(u32_at(&bytes, 40), 6);
        assert_eq!(&bytes[44..], &[1, 0, 2]);
    }

    #[test]
    fn test_non_ascii_delimiter_fails_before_writing() {
        let mut output = Cursor::new(Vec::new());
        let options = ConvertOptions::default().delimiter('é');
        let err = Converter::new(options, Verbosity::Quiet)
            .run(Cursor::new(b"1\n".as_slice()), &mut output)
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidDelimiter('é')));
        assert!(output.into_inner().is_empty());
    }
}
