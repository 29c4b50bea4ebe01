//! Turns finalized aggregator state into the report structure.

use crate::config::ProfilerConfig;
use crate::profiler::{ColumnAggregator, infer_column_type};
use crate::types::{ColumnSummary, NumericSummary, Report, TopValue};
use crate::utils::ratio_rounded;
use indexmap::IndexMap;

/// Assemble the final report from per-column aggregators, in column order.
pub fn assemble_report<I>(
    total_rows: u64,
    duplicate_row_count: u64,
    columns: I,
    config: &ProfilerConfig,
) -> Report
where
    I: IntoIterator<Item = (String, ColumnAggregator)>,
{
    if total_rows == 0 {
        return Report::empty();
    }

    let columns: IndexMap<String, ColumnSummary> = columns
        .into_iter()
        .map(|(name, aggregator)| {
            let summary = summarize_column(&aggregator, total_rows, config);
            (name, summary)
        })
        .collect();

    Report {
        rows: total_rows,
        duplicate_row_count,
        columns,
    }
}

/// Build the summary of one column.
pub fn summarize_column(
    aggregator: &ColumnAggregator,
    total_rows: u64,
    config: &ProfilerConfig,
) -> ColumnSummary {
    let inferred_type = infer_column_type(
        total_rows,
        aggregator.numeric_count(),
        aggregator.all_numeric_integral(),
        config.infer_integers,
    );

    ColumnSummary {
        null_count: aggregator.null_count(),
        null_pct: ratio_rounded(aggregator.null_count(), total_rows),
        distinct_count: aggregator.distinct_count(),
        distinct_count_is_approximate: aggregator.is_overflowed(),
        inferred_type,
        numeric_parseable_count: aggregator.numeric_count(),
        numeric: numeric_summary(aggregator),
        top_values: top_values(aggregator.frequencies(), config.top_n),
    }
}

fn numeric_summary(aggregator: &ColumnAggregator) -> Option<NumericSummary> {
    if aggregator.numeric_count() == 0 {
        return None;
    }
    let stats = aggregator.stats();
    Some(NumericSummary {
        min: aggregator.min()?,
        max: aggregator.max()?,
        mean: stats.mean()?,
        std: stats.std(),
    })
}

/// The `n` most frequent values, by descending count.
///
/// Ties keep the order in which values were first observed; the frequency
/// table iterates in insertion order and the sort is stable.
pub fn top_values(frequencies: &IndexMap<String, u64>, n: usize) -> Vec<TopValue> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(&String, &u64)> = frequencies.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(value, count)| TopValue {
            value: value.clone(),
            count: *count,
        })
        .collect()
}
