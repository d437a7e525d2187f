//! Redistribution of a corrected total over the forecast days.

use crate::config::ZeroTotalPolicy;

/// Rescales `daily` so that it sums to `corrected_total` while keeping each
/// day's share of `forecast_total`.
///
/// Missing (`NaN`) days stay missing. When `forecast_total` is zero the
/// daily shares are undefined and `policy` decides the output.
pub fn disaggregate(
    daily: &[f64],
    forecast_total: f64,
    corrected_total: f64,
    policy: ZeroTotalPolicy,
) -> Vec<f64> {
    if forecast_total == 0.0 || !forecast_total.is_finite() {
        return match policy {
            ZeroTotalPolicy::Zeros => daily
                .iter()
                .map(|&d| if d.is_finite() { 0.0 } else { d })
                .collect(),
            ZeroTotalPolicy::Passthrough => daily.to_vec(),
        };
    }
    daily
        .iter()
        .map(|&d| (d / forecast_total) * corrected_total)
        .collect()
}
