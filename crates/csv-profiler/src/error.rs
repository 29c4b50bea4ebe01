//! Error types for the profiling engine.
//!
//! Only input-format problems are errors. Empty input produces an empty report and
//! values that fail to parse as numbers are silently kept out of numeric aggregates,
//! so neither ever surfaces here.
//!
//! Errors are serializable so callers rendering reports can embed them as
//! `{code, message}` objects.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for profiling.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// A chunk arrived with a different column list than the first chunk.
    #[error("Chunk {chunk_index} has columns {found:?}, expected {expected:?}")]
    SchemaMismatch {
        chunk_index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A row did not carry one value per column.
    #[error("Row {row} has {found} values, expected {expected}")]
    MalformedChunk {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// CSV reader error wrapper.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for callers that branch on the failure kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::MalformedChunk { .. } => "MALFORMED_CHUNK",
            Self::Csv(_) => "CSV_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error comes from the shape or encoding of the input data,
    /// as opposed to configuration or the environment.
    pub fn is_input_format(&self) -> bool {
        match self {
            Self::SchemaMismatch { .. } | Self::MalformedChunk { .. } | Self::Csv(_) => true,
            Self::WithContext { source, .. } => source.is_input_format(),
            _ => false,
        }
    }
}

impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, csv::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Csv(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}
