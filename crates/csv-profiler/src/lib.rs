//! Streaming CSV Profiler
//!
//! A bounded-memory profiler for tabular datasets too large to load at once.
//!
//! # Overview
//!
//! The profiler reads rows in chunks and keeps incremental state per column and
//! per row, producing one [`Report`] with:
//!
//! - **Duplicates**: rows whose full value tuple was seen before, tracked via
//!   SHA-256 row hashes up to a configurable cap
//! - **Nulls**: count and rounded share of null values per column
//! - **Cardinality**: exact distinct counts up to a per-column limit, flagged
//!   approximate beyond it
//! - **Numeric statistics**: min, max, mean and sample standard deviation over
//!   values that parse as numbers (Welford's online algorithm)
//! - **Type inference**: `float` when at least 90% of rows are numeric,
//!   `string` otherwise, `empty` without rows
//! - **Top values**: most frequent values with deterministic tie-breaking
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use csv_profiler::{Profiler, ProfilerConfig};
//!
//! let config = ProfilerConfig::builder()
//!     .top_n(10)
//!     .null_markers(["", "NA"])
//!     .build()?;
//!
//! let report = Profiler::new(config)?.profile_csv("data.csv")?;
//! println!("{} rows, {} duplicates", report.rows, report.duplicate_row_count);
//! ```
//!
//! # Approximations
//!
//! Memory for distinct values and row hashes is capped; the frequency table
//! behind top values is not. Past `distinct_limit` distinct values a column's
//! `distinct_count` becomes `null`. Past `seen_hashes_limit` tracked rows the
//! duplicate detector stops looking, so `duplicate_row_count` is a lower bound.
//!
//! # Custom sources
//!
//! Anything implementing [`RowSource`] can be profiled; for push-style input use
//! [`StreamingProfile`] directly:
//!
//! ```rust,ignore
//! use csv_profiler::{Chunk, StreamingProfile, ProfilerConfig};
//!
//! let mut profile = StreamingProfile::new(ProfilerConfig::default());
//! profile.push_chunk(Chunk::from_rows(["a", "b"], [vec![Some("1"), None]])?)?;
//! let report = profile.finish();
//! ```

pub mod config;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod source;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder};
pub use error::{ProfilingError, Result as ProfilingResult, ResultExt};
pub use profiler::{ColumnAggregator, DuplicateDetector, Profiler, RunningStats, StreamingProfile};
pub use reporting::{ReportFormat, render_html, render_json, write_report};
pub use source::{Chunk, CsvRowSource, CsvSourceOptions, DataFrameRowSource, RowSource, VecRowSource};
pub use types::{ColumnSummary, InferredType, NumericSummary, Report, TopValue};
