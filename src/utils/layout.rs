//! Grid layout helpers
//!
//! Picks a column count for laying out a list of items so that the rows
//! come out as even as possible without exceeding a column cap.

use crate::error::{Error, Result};

/// Column cap used when the caller has no preference
pub const DEFAULT_MAX_COLUMNS: i64 = 4;

/// Smallest column count considered by the divisor search
const MIN_SEARCH_COLUMNS: i64 = 3;

/// Get the optimal number of columns for displaying `item_count` items
/// without exceeding `max_columns`
///
/// Rules, first match wins:
/// 1. No more items than the cap: one column per item.
/// 2. A cap of two always yields two columns.
/// 3. A perfect square whose root fits under the cap yields a square grid.
/// 4. The largest column count in `[3, max_columns]` that divides the items evenly.
/// 5. Otherwise the column count in `[3, max_columns]` leaving the fullest
///    last row (largest remainder), preferring larger counts on ties.
///
/// A cap of one with more than one item returns the cap.
///
/// # Errors
/// `Error::InvalidArgument` for a negative `item_count` or a non-positive `max_columns`.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(optimal_col_count(9, 4)?, 3);
/// assert_eq!(optimal_col_count(10, 4)?, 4);
/// ```
pub fn optimal_col_count(item_count: i64, max_columns: i64) -> Result<i64> {
    if item_count < 0 {
        return Err(Error::invalid_argument(format!(
            "item_count must not be negative, got {}",
            item_count
        )));
    }
    if max_columns <= 0 {
        return Err(Error::invalid_argument(format!(
            "max_columns must be positive, got {}",
            max_columns
        )));
    }

    if item_count <= max_columns {
        return Ok(item_count);
    }

    if max_columns == 2 {
        return Ok(2);
    }

    if let Some(root) = perfect_square_root(item_count) {
        if root <= max_columns {
            return Ok(root);
        }
    }

    if max_columns < MIN_SEARCH_COLUMNS {
        log::debug!(
            "optimal_col_count: cap {} below search range, using the cap",
            max_columns
        );
        return Ok(max_columns);
    }

    if let Some(exact) = (MIN_SEARCH_COLUMNS..=max_columns)
        .rev()
        .find(|columns| item_count % columns == 0)
    {
        return Ok(exact);
    }

    // Descending scan keeps the first maximum, so ties favour more columns
    let mut best = max_columns;
    let mut best_rest = item_count % max_columns;
    for columns in (MIN_SEARCH_COLUMNS..max_columns).rev() {
        let rest = item_count % columns;
        if rest > best_rest {
            best = columns;
            best_rest = rest;
        }
    }

    Ok(best)
}

/// Same as [`optimal_col_count`] with [`DEFAULT_MAX_COLUMNS`]
pub fn optimal_col_count_default(item_count: i64) -> Result<i64> {
    optimal_col_count(item_count, DEFAULT_MAX_COLUMNS)
}

fn perfect_square_root(value: i64) -> Option<i64> {
    let mut root = (value as f64).sqrt() as i64;
    // Float sqrt can be off by one for large inputs
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > value) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= value) {
        root += 1;
    }
    (root * root == value).then_some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_items_than_cap() {
        assert_eq!(optimal_col_count(0, 4).unwrap(), 0);
        assert_eq!(optimal_col_count(1, 4).unwrap(), 1);
        assert_eq!(optimal_col_count(3, 4).unwrap(), 3);
        assert_eq!(optimal_col_count(4, 4).unwrap(), 4);
    }

    #[test]
    fn test_binary_cap() {
        for items in 3..50 {
            assert_eq!(optimal_col_count(items, 2).unwrap(), 2);
        }
    }

    #[test]
    fn test_perfect_square() {
        assert_eq!(optimal_col_count(9, 4).unwrap(), 3);
        assert_eq!(optimal_col_count(16, 4).unwrap(), 4);
        assert_eq!(optimal_col_count(25, 6).unwrap(), 5);
        // Root above the cap falls through to the divisor search
        assert_eq!(optimal_col_count(36, 4).unwrap(), 4);
    }

    #[test]
    fn test_exact_divisor_prefers_larger() {
        assert_eq!(optimal_col_count(12, 4).unwrap(), 4);
        assert_eq!(optimal_col_count(15, 4).unwrap(), 3);
        assert_eq!(optimal_col_count(20, 6).unwrap(), 5);
    }

    #[test]
    fn test_largest_remainder_fallback() {
        // 10 % 4 = 2, 10 % 3 = 1
        assert_eq!(optimal_col_count(10, 4).unwrap(), 4);
        // 7 % 4 = 3, 7 % 3 = 1
        assert_eq!(optimal_col_count(7, 4).unwrap(), 4);
        // 11 % 5 = 1, 11 % 4 = 3, 11 % 3 = 2
        assert_eq!(optimal_col_count(11, 5).unwrap(), 4);
        // 13 % 6 = 1, 13 % 5 = 3, 13 % 4 = 1, 13 % 3 = 1
        assert_eq!(optimal_col_count(13, 6).unwrap(), 5);
    }

    #[test]
    fn test_remainder_tie_goes_to_larger_count() {
        // 17 % 5 = 2, 17 % 4 = 1, 17 % 3 = 2
        assert_eq!(optimal_col_count(17, 5).unwrap(), 5);
    }

    #[test]
    fn test_cap_of_one() {
        assert_eq!(optimal_col_count(5, 1).unwrap(), 1);
        assert_eq!(optimal_col_count(1, 1).unwrap(), 1);
        // Square root above the cap still lands on the cap
        assert_eq!(optimal_col_count(4, 1).unwrap(), 1);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(optimal_col_count(-1, 4).unwrap_err().is_invalid_argument());
        assert!(optimal_col_count(5, 0).unwrap_err().is_invalid_argument());
        assert!(optimal_col_count(5, -3).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_result_always_within_cap() {
        for max in 1..=8 {
            for items in 1..=200 {
                let cols = optimal_col_count(items, max).unwrap();
                assert!(cols >= 1 && cols <= max, "({}, {}) -> {}", items, max, cols);
            }
        }
    }

    #[test]
    fn test_default_cap() {
        assert_eq!(optimal_col_count_default(8).unwrap(), 4);
        assert_eq!(optimal_col_count_default(2).unwrap(), 2);
    }

    #[test]
    fn test_perfect_square_root() {
        assert_eq!(perfect_square_root(0), Some(0));
        assert_eq!(perfect_square_root(1), Some(1));
        assert_eq!(perfect_square_root(49), Some(7));
        assert_eq!(perfect_square_root(50), None);
        assert_eq!(perfect_square_root(1 << 40), Some(1 << 20));
    }
}
