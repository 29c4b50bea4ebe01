//! Row sources feeding the profiling engine.
//!
//! A [`RowSource`] yields the dataset as an ordered sequence of [`Chunk`]s. Each
//! chunk carries its column names, so the engine can fix the schema from the
//! first chunk and check every later one against it.
//!
//! Two sources are provided:
//! - [`CsvRowSource`] streams records from a CSV file or reader
//! - [`DataFrameRowSource`] slices an in-memory polars `DataFrame`

mod csv_reader;
mod dataframe;

pub use csv_reader::{CsvRowSource, CsvSourceOptions};
pub use dataframe::DataFrameRowSource;

use crate::error::{ProfilingError, Result};

/// A source of row chunks over a fixed column schema.
pub trait RowSource {
    /// Pull the next chunk of at most `max_rows` rows.
    ///
    /// Returns `Ok(None)` once the source is exhausted. A source that cannot
    /// even produce its schema must fail here rather than return `None`.
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Chunk>>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Chunk>> {
        (**self).next_chunk(max_rows)
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn next_chunk(&mut self, max_rows: usize) -> Result<Option<Chunk>> {
        (**self).next_chunk(max_rows)
    }
}

/// A batch of rows sharing one column list.
///
/// Rows are stored row-major; every row holds exactly one value per column,
/// `None` standing for an absent value.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Chunk {
    /// Build a chunk, rejecting rows whose width differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(ProfilingError::MalformedChunk {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Convenience constructor from string slices, mainly for tests and
    /// small in-memory inputs.
    pub fn from_rows<C, R, V>(columns: C, rows: R) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator<Item = Option<&'static str>>,
    {
        Self::new(
            columns.into_iter().map(Into::into).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| row[index].as_deref())
    }

    /// Replace every value matching `is_null` with `None`.
    pub(crate) fn normalize_nulls(&mut self, is_null: impl Fn(&str) -> bool) {
        for value in self.rows.iter_mut().flatten() {
            if value.as_deref().is_some_and(&is_null) {
                *value = None;
            }
        }
    }
}

/// Row source over chunks already held in memory.
///
/// Chunks are handed out as they were given; `max_rows` is not applied.
#[derive(Debug, Default)]
pub struct VecRowSource {
    chunks: std::collections::VecDeque<Chunk>,
}

impl VecRowSource {
    pub fn new(chunks: impl IntoIterator<Item = Chunk>) -> Self {
        Self {
            chunks: chunks.into_iter().collect(),
        }
    }
}

impl RowSource for VecRowSource {
    fn next_chunk(&mut self, _max_rows: usize) -> Result<Option<Chunk>> {
        Ok(self.chunks.pop_front())
    }
}
