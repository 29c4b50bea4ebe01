//! Configuration for the profiling engine.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic profiler setup.

use serde::{Deserialize, Serialize};

/// Default number of most frequent values reported per column.
pub const DEFAULT_TOP_N: usize = 5;
/// Default maximum number of rows pulled from a source per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
/// Default cap on exact distinct-value tracking per column.
pub const DEFAULT_DISTINCT_LIMIT: usize = 100_000;
/// Default cap on tracked row hashes for duplicate detection.
pub const DEFAULT_SEEN_HASHES_LIMIT: usize = 1_000_000;

/// Configuration for a profiling run.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use csv_profiler::config::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .top_n(10)
///     .distinct_limit(50_000)
///     .null_markers(["", "NA"])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Number of most frequent values reported per column.
    /// Default: 5
    pub top_n: usize,

    /// Maximum number of rows requested from the row source per chunk.
    /// Must be at least 1.
    /// Default: 100000
    pub chunk_size: usize,

    /// Number of distinct non-null values tracked exactly per column.
    /// Once exceeded, the column's distinct count is reported as unknown
    /// and flagged approximate for the rest of the run.
    /// Default: 100000
    pub distinct_limit: usize,

    /// Number of row hashes tracked for duplicate detection.
    /// Rows arriving after the hash set outgrows this limit are not checked,
    /// so the duplicate count becomes an undercount.
    /// Default: 1000000
    pub seen_hashes_limit: usize,

    /// Raw values treated as null in addition to absent values.
    /// Default: `[""]`
    pub null_markers: Vec<String>,

    /// Report `integer` instead of `float` for numeric columns whose parseable
    /// values are all integral.
    /// Default: false
    pub infer_integers: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            chunk_size: DEFAULT_CHUNK_SIZE,
            distinct_limit: DEFAULT_DISTINCT_LIMIT,
            seen_hashes_limit: DEFAULT_SEEN_HASHES_LIMIT,
            null_markers: vec![String::new()],
            infer_integers: false,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chunk_size == 0 {
            return Err(ConfigValidationError::InvalidChunkSize(self.chunk_size));
        }

        let mut seen = std::collections::HashSet::new();
        for marker in &self.null_markers {
            if !seen.insert(marker.as_str()) {
                return Err(ConfigValidationError::DuplicateNullMarker(marker.clone()));
            }
        }

        Ok(())
    }

    /// Whether a raw value should be treated as null.
    #[inline]
    pub fn is_null_marker(&self, value: &str) -> bool {
        self.null_markers.iter().any(|m| m == value)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    #[error("Null marker {0:?} listed more than once")]
    DuplicateNullMarker(String),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    top_n: Option<usize>,
    chunk_size: Option<usize>,
    distinct_limit: Option<usize>,
    seen_hashes_limit: Option<usize>,
    null_markers: Option<Vec<String>>,
    infer_integers: Option<bool>,
}

impl ProfilerConfigBuilder {
    /// Set how many of the most frequent values are reported per column.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the maximum number of rows pulled from the source per chunk.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Set the per-column cap on exact distinct-value tracking.
    pub fn distinct_limit(mut self, limit: usize) -> Self {
        self.distinct_limit = Some(limit);
        self
    }

    /// Set the cap on tracked row hashes for duplicate detection.
    pub fn seen_hashes_limit(mut self, limit: usize) -> Self {
        self.seen_hashes_limit = Some(limit);
        self
    }

    /// Replace the set of raw values treated as null.
    ///
    /// Pass an empty list to treat empty strings as ordinary values.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable the integer refinement of numeric type inference.
    pub fn infer_integers(mut self, enabled: bool) -> Self {
        self.infer_integers = Some(enabled);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let config = ProfilerConfig {
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            distinct_limit: self.distinct_limit.unwrap_or(DEFAULT_DISTINCT_LIMIT),
            seen_hashes_limit: self.seen_hashes_limit.unwrap_or(DEFAULT_SEEN_HASHES_LIMIT),
            null_markers: self.null_markers.unwrap_or_else(|| vec![String::new()]),
            infer_integers: self.infer_integers.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
