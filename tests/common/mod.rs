//! Shared test utilities for generating delimited input files and reading
//! back produced WAV files.

use std::fs;
use std::path::{Path, PathBuf};

/// Value series used to fill the sample column
#[derive(Debug, Clone, Copy)]
pub enum Series {
    /// 0, 1, 2, ... as integers
    Ramp,
    /// Sine wave scaled by the given amplitude, printed as decimals
    Sine(f32),
    /// All zeros
    Silence,
}

/// Configuration for a generated input table
#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub rows: usize,
    pub columns: usize,
    pub value_column: usize,
    pub delimiter: char,
    pub series: Series,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            columns: 3,
            value_column: 1,
            delimiter: ',',
            series: Series::Ramp,
        }
    }
}

impl CsvConfig {
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    #[allow(dead_code)]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series = series;
        self
    }

    pub fn value(&self, row: usize) -> String {
        match self.series {
            Series::Ramp => row.to_string(),
            Series::Sine(amplitude) => {
                let t = row as f32 / 16.0;
                format!("{:.4}", (t * 2.0 * std::f32::consts::PI).sin() * amplitude)
            }
            Series::Silence => "0".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            let fields: Vec<String> = (0..self.columns)
                .map(|col| {
                    if col == self.value_column {
                        self.value(row)
                    } else {
                        format!("r{row}c{col}")
                    }
                })
                .collect();
            out.push_str(&fields.join(&self.delimiter.to_string()));
            out.push('\n');
        }
        out
    }

    pub fn write_to_path(&self, path: &Path) {
        fs::write(path, self.render()).expect("Failed to write input table");
    }
}

pub fn write_rows(path: &Path, rows: &[&str]) {
    fs::write(path, rows.concat()).expect("Failed to write input table");
}

pub fn cswave_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("cswave");
    path
}

pub fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

pub fn has_chunk(bytes: &[u8], id: &[u8; 4], header_len: usize) -> bool {
    bytes[..header_len].windows(4).any(|w| w == id)
}
