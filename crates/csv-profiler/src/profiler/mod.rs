//! Streaming profiling engine.
//!
//! This module provides the engine that turns a chunked row source into a
//! [`Report`]:
//! - Duplicate row detection over a capped hash set
//! - Per-column null, frequency, distinct and numeric tracking
//! - Online mean/variance that never retains raw values
//! - Type inference from the accumulated counts
//!
//! Chunks are consumed strictly in source order; duplicate detection and the
//! first-occurrence tie-breaking of top values both depend on it.

mod column;
mod duplicates;
mod running_stats;
mod type_inference;

pub use column::ColumnAggregator;
pub use duplicates::{DuplicateDetector, FIELD_SEPARATOR};
pub use running_stats::RunningStats;
pub use type_inference::NUMERIC_THRESHOLD;

pub(crate) use type_inference::infer_column_type;

use crate::config::ProfilerConfig;
use crate::error::{ProfilingError, Result, ResultExt};
use crate::reporting::assemble_report;
use crate::source::{Chunk, CsvRowSource, DataFrameRowSource, RowSource};
use crate::types::Report;
use polars::prelude::DataFrame;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Entry point for profiling a whole row source in one call.
#[derive(Debug, Clone)]
pub struct Profiler {
    config: ProfilerConfig,
}

static_assertions::assert_impl_all!(Profiler: Send, Sync);

impl Profiler {
    /// Create a profiler, validating the configuration.
    pub fn new(config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Drain `source` chunk by chunk and build the report.
    ///
    /// Any source error aborts the run; no partial report is produced.
    pub fn profile<S: RowSource>(&self, mut source: S) -> Result<Report> {
        let started = Instant::now();
        let mut profile = StreamingProfile::new(self.config.clone());

        while let Some(chunk) = source.next_chunk(self.config.chunk_size)? {
            profile.push_chunk(chunk)?;
        }

        let chunks = profile.chunks_seen();
        let report = profile.finish();
        info!(
            "Profiled {} rows, {} columns in {} chunks ({} ms)",
            report.rows,
            report.columns.len(),
            chunks,
            started.elapsed().as_millis()
        );
        Ok(report)
    }

    /// Profile a CSV file from disk.
    pub fn profile_csv(&self, path: impl AsRef<Path>) -> Result<Report> {
        let path = path.as_ref();
        info!("Profiling CSV file: {}", path.display());
        let source = CsvRowSource::from_path(path)?;
        self.profile(source)
            .context(format!("Failed to profile {}", path.display()))
    }

    /// Profile an in-memory polars `DataFrame`.
    pub fn profile_dataframe(&self, df: DataFrame) -> Result<Report> {
        info!("Profiling DataFrame with shape {:?}", df.shape());
        self.profile(DataFrameRowSource::new(df))
    }
}

/// Push-based profiling state for callers that produce chunks themselves.
///
/// The first pushed chunk fixes the column order; every later chunk must carry
/// the same columns in the same order. [`finish`](Self::finish) consumes the
/// state, so a profile is assembled exactly once.
#[derive(Debug)]
pub struct StreamingProfile {
    config: ProfilerConfig,
    columns: Option<Vec<String>>,
    aggregators: Vec<ColumnAggregator>,
    duplicates: DuplicateDetector,
    total_rows: u64,
    chunks_seen: usize,
}

impl StreamingProfile {
    pub fn new(config: ProfilerConfig) -> Self {
        let duplicates = DuplicateDetector::new(config.seen_hashes_limit);
        Self {
            config,
            columns: None,
            aggregators: Vec::new(),
            duplicates,
            total_rows: 0,
            chunks_seen: 0,
        }
    }

    /// Fold one chunk into the running state.
    pub fn push_chunk(&mut self, mut chunk: Chunk) -> Result<()> {
        let config = &self.config;
        chunk.normalize_nulls(|v| config.is_null_marker(v));

        if let Some(expected) = &self.columns {
            if expected.as_slice() != chunk.columns() {
                return Err(ProfilingError::SchemaMismatch {
                    chunk_index: self.chunks_seen,
                    expected: expected.clone(),
                    found: chunk.columns().to_vec(),
                });
            }
        } else {
            debug!("Column order fixed from first chunk: {:?}", chunk.columns());
            self.aggregators = chunk
                .columns()
                .iter()
                .map(|_| ColumnAggregator::new(self.config.distinct_limit))
                .collect();
            self.columns = Some(chunk.columns().to_vec());
        }

        let was_saturated = self.duplicates.is_saturated();
        for row in chunk.rows() {
            self.duplicates.observe(row.iter().map(|v| v.as_deref()));
        }
        if !was_saturated && self.duplicates.is_saturated() {
            warn!(
                "Duplicate tracking stopped after {} distinct rows; duplicate count is a lower bound from here on",
                self.duplicates.tracked_hashes()
            );
        }

        for (index, aggregator) in self.aggregators.iter_mut().enumerate() {
            if aggregator.observe_chunk(chunk.column_values(index)) {
                warn!(
                    "Column '{}' exceeded {} distinct values; distinct count will be reported as approximate",
                    chunk.columns()[index],
                    self.config.distinct_limit
                );
            }
        }

        self.total_rows += chunk.num_rows() as u64;
        self.chunks_seen += 1;
        debug!(
            "Chunk {}: {} rows ({} total, {} duplicates so far)",
            self.chunks_seen,
            chunk.num_rows(),
            self.total_rows,
            self.duplicates.duplicate_count()
        );
        Ok(())
    }

    pub fn rows_seen(&self) -> u64 {
        self.total_rows
    }

    pub fn chunks_seen(&self) -> usize {
        self.chunks_seen
    }

    /// Column order fixed by the first chunk, if any chunk arrived yet.
    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }

    /// Consume the state and assemble the final report.
    pub fn finish(self) -> Report {
        if self.total_rows == 0 {
            return Report::empty();
        }

        let columns = self.columns.unwrap_or_default();
        assemble_report(
            self.total_rows,
            self.duplicates.duplicate_count(),
            columns.into_iter().zip(self.aggregators),
            &self.config,
        )
    }
}
