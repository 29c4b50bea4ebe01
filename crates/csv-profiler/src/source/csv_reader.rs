//! Streaming CSV row source.

use super::{Chunk, RowSource};
use crate::error::{Result, ResultExt};
use crate::utils::deduplicate_headers;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Options for reading CSV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSourceOptions {
    /// Field delimiter byte.
    /// Default: `b','`
    pub delimiter: u8,
    /// Whether leading and trailing whitespace of every field is removed.
    /// Default: false
    pub trim: bool,
}

impl Default for CsvSourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

/// Reads a headered CSV stream record by record and hands it out in chunks.
///
/// The header row defines the columns; repeated header names are made unique
/// with `.1`, `.2`, ... suffixes. Records with a different field count than the
/// header are an input-format error. Every field is passed on as a string; the
/// engine decides which ones are null.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    columns: Vec<String>,
    record: StringRecord,
    exhausted: bool,
}

impl CsvRowSource<File> {
    /// Open a CSV file with default options.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_options(path, CsvSourceOptions::default())
    }

    /// Open a CSV file.
    pub fn from_path_with_options(path: impl AsRef<Path>, options: CsvSourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let reader = Self::builder(options)
            .from_path(path)
            .context(format!("Failed to open {}", path.display()))?;
        Self::from_csv_reader(reader)
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Wrap any reader with default options.
    pub fn from_reader(rdr: R) -> Result<Self> {
        Self::from_reader_with_options(rdr, CsvSourceOptions::default())
    }

    pub fn from_reader_with_options(rdr: R, options: CsvSourceOptions) -> Result<Self> {
        Self::from_csv_reader(Self::builder(options).from_reader(rdr))
    }

    fn builder(options: CsvSourceOptions) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(false)
            .delimiter(options.delimiter)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }

    fn from_csv_reader(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers().context("Failed to read CSV header")?;
        let columns = deduplicate_headers(headers.iter());
        debug!("CSV header: {} columns", columns.len());

        Ok(Self {
            reader,
            exhausted: columns.is_empty(),
            columns,
            record: StringRecord::new(),
        })
    }

    /// Column names from the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Chunk>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(max_rows.min(8192));
        while rows.len() < max_rows {
            let more = self
                .reader
                .read_record(&mut self.record)
                .context("Failed to read CSV record")?;
            if !more {
                self.exhausted = true;
                break;
            }
            rows.push(self.record.iter().map(|f| Some(f.to_string())).collect());
        }

        if rows.is_empty() {
            return Ok(None);
        }
        Chunk::new(self.columns.clone(), rows).map(Some)
    }
}
