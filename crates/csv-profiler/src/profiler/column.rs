//! Per-column streaming accumulator.

use super::running_stats::RunningStats;
use crate::utils::{is_integral, parse_numeric_value};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Accumulates everything the report needs about one column.
///
/// The frequency table is unbounded and keeps first-occurrence order for
/// deterministic top-N tie-breaking. The distinct set is capped at
/// `distinct_limit`; exceeding it frees the set and turns the distinct count
/// into an unknown for the rest of the run.
#[derive(Debug)]
pub struct ColumnAggregator {
    distinct_limit: usize,
    null_count: u64,
    frequencies: IndexMap<String, u64>,
    distinct: HashSet<String>,
    overflowed: bool,
    numeric_count: u64,
    integral_count: u64,
    min: Option<f64>,
    max: Option<f64>,
    stats: RunningStats,
}

impl ColumnAggregator {
    pub fn new(distinct_limit: usize) -> Self {
        Self {
            distinct_limit,
            null_count: 0,
            frequencies: IndexMap::new(),
            distinct: HashSet::new(),
            overflowed: false,
            numeric_count: 0,
            integral_count: 0,
            min: None,
            max: None,
            stats: RunningStats::new(),
        }
    }

    /// Fold one chunk's worth of this column's values into the state.
    ///
    /// Returns true if this chunk pushed the column past its distinct limit.
    pub fn observe_chunk<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut chunk_min: Option<f64> = None;
        let mut chunk_max: Option<f64> = None;

        for value in values {
            let Some(value) = value else {
                self.null_count += 1;
                continue;
            };

            match self.frequencies.get_mut(value) {
                Some(count) => *count += 1,
                None => {
                    self.frequencies.insert(value.to_string(), 1);
                }
            }

            if !self.overflowed && !self.distinct.contains(value) {
                self.distinct.insert(value.to_string());
            }

            if let Some(x) = parse_numeric_value(value) {
                self.numeric_count += 1;
                if is_integral(x) {
                    self.integral_count += 1;
                }
                self.stats.add(x);
                chunk_min = Some(chunk_min.map_or(x, |m| m.min(x)));
                chunk_max = Some(chunk_max.map_or(x, |m| m.max(x)));
            }
        }

        if let Some(lo) = chunk_min {
            self.min = Some(self.min.map_or(lo, |m| m.min(lo)));
        }
        if let Some(hi) = chunk_max {
            self.max = Some(self.max.map_or(hi, |m| m.max(hi)));
        }

        if !self.overflowed && self.distinct.len() > self.distinct_limit {
            self.overflowed = true;
            self.distinct = HashSet::new();
            return true;
        }
        false
    }

    pub fn null_count(&self) -> u64 {
        self.null_count
    }

    pub fn numeric_count(&self) -> u64 {
        self.numeric_count
    }

    /// Whether every value that parsed as a number was integral.
    pub fn all_numeric_integral(&self) -> bool {
        self.integral_count == self.numeric_count
    }

    /// Exact distinct non-null count, `None` after overflow.
    pub fn distinct_count(&self) -> Option<u64> {
        (!self.overflowed).then_some(self.distinct.len() as u64)
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Frequency table in first-occurrence order.
    pub fn frequencies(&self) -> &IndexMap<String, u64> {
        &self.frequencies
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe(agg: &mut ColumnAggregator, values: &[Option<&str>]) -> bool {
        agg.observe_chunk(values.iter().copied())
    }

    #[test]
    fn test_counts_nulls_and_frequencies() {
        let mut agg = ColumnAggregator::new(100);
        observe(&mut agg, &[Some("a"), None, Some("b"), Some("a")]);
        observe(&mut agg, &[None, Some("c"), Some("a")]);

        assert_eq!(agg.null_count(), 2);
        let freqs: Vec<_> = agg
            .frequencies()
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(freqs, vec![("a", 3), ("b", 1), ("c", 1)]);
        assert_eq!(agg.distinct_count(), Some(3));
    }

    #[test]
    fn test_numeric_tracking_ignores_text() {
        let mut agg = ColumnAggregator::new(100);
        observe(&mut agg, &[Some("3"), Some("x"), Some("-1.5")]);
        observe(&mut agg, &[Some("10"), None, Some("n/a")]);

        assert_eq!(agg.numeric_count(), 3);
        assert_eq!(agg.min(), Some(-1.5));
        assert_eq!(agg.max(), Some(10.0));
        assert_eq!(agg.stats().count(), 3);
        assert!((agg.stats().mean().unwrap() - 11.5 / 3.0).abs() < 1e-12);
        assert!(!agg.all_numeric_integral());
    }

    #[test]
    fn test_no_numeric_values_leaves_min_max_unset() {
        let mut agg = ColumnAggregator::new(100);
        observe(&mut agg, &[Some("x"), None]);
        assert_eq!(agg.numeric_count(), 0);
        assert_eq!(agg.min(), None);
        assert_eq!(agg.max(), None);
        assert!(agg.all_numeric_integral());
    }

    #[test]
    fn test_integral_tracking() {
        let mut agg = ColumnAggregator::new(100);
        observe(&mut agg, &[Some("1"), Some("2.0"), Some("1e2")]);
        assert!(agg.all_numeric_integral());
    }

    #[test]
    fn test_distinct_overflow_is_permanent() {
        let mut agg = ColumnAggregator::new(2);
        assert!(!observe(&mut agg, &[Some("a"), Some("b"), Some("a")]));
        assert_eq!(agg.distinct_count(), Some(2));

        assert!(observe(&mut agg, &[Some("c")]));
        assert!(agg.is_overflowed());
        assert_eq!(agg.distinct_count(), None);

        // Values already seen do not bring the count back.
        assert!(!observe(&mut agg, &[Some("a")]));
        assert_eq!(agg.distinct_count(), None);
        // Frequencies stay exact after overflow.
        assert_eq!(agg.frequencies()["a"], 3);
    }

    #[test]
    fn test_overflow_checked_after_whole_chunk() {
        let mut agg = ColumnAggregator::new(1);
        assert!(observe(&mut agg, &[Some("a"), Some("b"), Some("c")]));
        assert_eq!(agg.distinct_count(), None);
    }

    #[test]
    fn test_counts_add_up() {
        let mut agg = ColumnAggregator::new(100);
        let values = [Some("1"), None, Some("abc"), Some("2"), None, Some(" 3 ")];
        observe(&mut agg, &values);

        let text = agg
            .frequencies()
            .iter()
            .filter(|(k, _)| parse_numeric_value(k).is_none())
            .map(|(_, v)| *v)
            .sum::<u64>();
        assert_eq!(agg.null_count() + text + agg.numeric_count(), values.len() as u64);
    }
}
