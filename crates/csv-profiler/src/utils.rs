//! Shared helpers for parsing values and shaping report numbers.

use std::collections::{HashMap, HashSet};

// =============================================================================
// Value Parsing Utilities
// =============================================================================

/// Try to parse a raw cell value as a finite 64-bit float.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected so that
/// numeric aggregates only ever see finite values.
///
/// # Example
///
/// ```rust,ignore
/// use csv_profiler::utils::parse_numeric_value;
///
/// assert_eq!(parse_numeric_value(" 4.5 "), Some(4.5));
/// assert_eq!(parse_numeric_value("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric_value("inf"), None);
/// assert_eq!(parse_numeric_value("abc"), None);
/// ```
#[inline]
pub fn parse_numeric_value(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if a parsed value has no fractional part.
#[inline]
pub fn is_integral(value: f64) -> bool {
    value.fract() == 0.0
}

// =============================================================================
// Report Number Utilities
// =============================================================================

/// Round a value to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Fraction of `part` over `total`, rounded to six decimal digits.
///
/// Returns 0.0 when `total` is zero.
pub fn ratio_rounded(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64, 6)
}

// =============================================================================
// Header Utilities
// =============================================================================

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
///
/// The first occurrence keeps its name. A generated name that collides with a
/// later literal header is bumped until it is free.
pub fn deduplicate_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let headers: Vec<String> = headers.into_iter().map(|h| h.as_ref().to_string()).collect();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut first_seen = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for name in headers {
        if first_seen.insert(name.clone()) {
            result.push(name);
            continue;
        }

        let counter = repeats.entry(name.clone()).or_insert(0);
        let renamed = loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(renamed.clone());
        result.push(renamed);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_numeric_value tests ====================

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_numeric_value("42"), Some(42.0));
        assert_eq!(parse_numeric_value("-3.25"), Some(-3.25));
        assert_eq!(parse_numeric_value("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_value(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_numeric_value("  7 "), Some(7.0));
    }

    #[test]
    fn test_parse_rejects_text_and_non_finite() {
        assert_eq!(parse_numeric_value("abc"), None);
        assert_eq!(parse_numeric_value("12abc"), None);
        assert_eq!(parse_numeric_value(""), None);
        assert_eq!(parse_numeric_value("   "), None);
        assert_eq!(parse_numeric_value("NaN"), None);
        assert_eq!(parse_numeric_value("inf"), None);
        assert_eq!(parse_numeric_value("-infinity"), None);
    }

    #[test]
    fn test_is_integral() {
        assert!(is_integral(3.0));
        assert!(is_integral(-0.0));
        assert!(!is_integral(3.5));
    }

    // ==================== rounding tests ====================

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.1234567, 6), 0.123457);
        assert_eq!(round_to(1.0 / 3.0, 6), 0.333333);
    }

    #[test]
    fn test_ratio_rounded() {
        assert_eq!(ratio_rounded(1, 3), 0.333333);
        assert_eq!(ratio_rounded(2, 3), 0.666667);
        assert_eq!(ratio_rounded(5, 5), 1.0);
        assert_eq!(ratio_rounded(0, 0), 0.0);
    }

    // ==================== deduplicate_headers tests ====================

    #[test]
    fn test_deduplicate_headers_unique_untouched() {
        assert_eq!(deduplicate_headers(["a", "b", "c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deduplicate_headers_repeats() {
        assert_eq!(
            deduplicate_headers(["a", "a", "b", "a"]),
            vec!["a", "a.1", "b", "a.2"]
        );
    }

    #[test]
    fn test_deduplicate_headers_avoids_literal_collision() {
        assert_eq!(
            deduplicate_headers(["a", "a", "a.1"]),
            vec!["a", "a.2", "a.1"]
        );
    }
}
