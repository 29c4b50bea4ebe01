//! Type inference from counts accumulated online.

use crate::types::InferredType;

/// Share of rows that must parse as numbers for a column to count as numeric.
pub const NUMERIC_THRESHOLD: f64 = 0.9;

/// Infer a column type without revisiting any raw value.
///
/// The fraction is taken over all rows, nulls included, so a sparse numeric
/// column can fall below the threshold and be reported as `string`.
/// `integer` is only returned when `infer_integers` is set and every
/// parseable value was integral.
pub(crate) fn infer_column_type(
    total_rows: u64,
    numeric_count: u64,
    all_integral: bool,
    infer_integers: bool,
) -> InferredType {
    if total_rows == 0 {
        return InferredType::Empty;
    }

    let frac = numeric_count as f64 / total_rows as f64;
    if frac >= NUMERIC_THRESHOLD {
        if infer_integers && all_integral {
            InferredType::Integer
        } else {
            InferredType::Float
        }
    } else {
        InferredType::String
    }
}
