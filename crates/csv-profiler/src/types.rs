use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column type inferred from the counts accumulated while profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferredType {
    /// The dataset has no rows.
    Empty,
    /// At least 90% of rows parse as numbers and all of them are integral.
    /// Only reported when integer inference is enabled.
    Integer,
    /// At least 90% of rows parse as numbers.
    Float,
    /// Everything else.
    String,
}

impl InferredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl std::fmt::Display for InferredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a column's most-frequent-values list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: u64,
}

/// Summary statistics over the values of a column that parsed as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub null_count: u64,
    /// `null_count / rows`, rounded to six decimal digits.
    pub null_pct: f64,
    /// Exact number of distinct non-null values, or `None` once the column
    /// exceeded the configured distinct limit.
    pub distinct_count: Option<u64>,
    #[serde(alias = "distinct_count_approx")]
    pub distinct_count_is_approximate: bool,
    pub inferred_type: InferredType,
    pub numeric_parseable_count: u64,
    /// Present only when at least one value parsed as a number.
    #[serde(flatten)]
    pub numeric: Option<NumericSummary>,
    /// Most frequent non-null values, by descending count then first occurrence.
    pub top_values: Vec<TopValue>,
}

/// Final result of a profiling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub rows: u64,
    pub duplicate_row_count: u64,
    /// Column summaries in the column order of the input.
    pub columns: IndexMap<String, ColumnSummary>,
}

impl Report {
    /// Report for an input without any rows.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            duplicate_row_count: 0,
            columns: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.get(name)
    }

    /// Share of rows flagged as duplicates, rounded to six decimal digits.
    pub fn duplicate_pct(&self) -> f64 {
        crate::utils::ratio_rounded(self.duplicate_row_count, self.rows)
    }
}

static_assertions::assert_impl_all!(Report: Send, Sync);
