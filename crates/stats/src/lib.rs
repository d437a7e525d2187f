//! NaN-tolerant aggregation helpers for daily precipitation series.
//!
//! Missing days are stored as `NaN`. Every function here states whether
//! missing entries are excluded or propagated.

use std::cmp::Ordering;

/// Sum of a window of daily values together with its coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTotal {
    /// Sum of the finite values (missing days excluded).
    pub sum: f64,
    /// Number of finite values that contributed to `sum`.
    pub n_valid: usize,
    /// Number of non-finite values that were skipped.
    pub n_missing: usize,
}

impl WindowTotal {
    /// Returns `true` if no value in the window was finite.
    pub fn is_empty(&self) -> bool {
        self.n_valid == 0
    }
}

/// Sum of the finite values in `data`. Missing (`NaN`/infinite) values are
/// excluded, so an all-missing slice sums to 0.0.
pub fn nansum(data: &[f64]) -> f64 {
    data.iter().filter(|x| x.is_finite()).sum()
}

/// Like [`nansum`], but also reports how many values were used and skipped.
pub fn window_total(data: &[f64]) -> WindowTotal {
    let mut sum = 0.0;
    let mut n_valid = 0;
    for &x in data {
        if x.is_finite() {
            sum += x;
            n_valid += 1;
        }
    }
    WindowTotal {
        sum,
        n_valid,
        n_missing: data.len() - n_valid,
    }
}

/// Minimum and maximum of the finite values, or `None` if there are none.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Returns an ascending copy of `data`.
///
/// Non-finite values compare equal to everything, so callers should filter
/// them out first.
pub fn sorted_ascending(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}
