//! Nearest-rank empirical quantile mapping of a single total.

use prbias_stats::sorted_ascending;

use crate::error::QuantileMapError;

/// Outcome of mapping one forecast total onto the observed distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedTotal {
    /// Observation value at the matched rank.
    pub value: f64,
    /// Zero-based rank in the sorted reference distribution.
    pub rank: usize,
}

/// Index of the element of `reference` closest to `target`.
///
/// Ties resolve to the highest index, so an exact value repeated in a sorted
/// reference maps to its last occurrence.
///
/// # Errors
///
/// Returns [`QuantileMapError::EmptyReference`] if `reference` is empty, or
/// [`QuantileMapError::NonFiniteForecast`] if `target` is not finite.
pub fn nearest_rank_index(reference: &[f64], target: f64) -> Result<usize, QuantileMapError> {
    if !target.is_finite() {
        return Err(QuantileMapError::NonFiniteForecast { value: target });
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, &r) in reference.iter().enumerate() {
        let dist = (target - r).abs();
        match best {
            Some((_, d)) if dist > d => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i).ok_or(QuantileMapError::EmptyReference)
}

/// Maps `forecast_total` onto the observed climatology.
///
/// Both climatologies are sorted independently; the forecast is located in
/// the sorted model distribution and replaced by the observation of the same
/// rank. Input order of either slice does not matter.
///
/// # Errors
///
/// Returns [`QuantileMapError::LengthMismatch`] if the climatologies differ
/// in length, [`QuantileMapError::EmptyReference`] if they are empty, or
/// [`QuantileMapError::NonFiniteForecast`] if the forecast is not finite.
pub fn map_total(
    forecast_total: f64,
    model: &[f64],
    obs: &[f64],
) -> Result<MappedTotal, QuantileMapError> {
    if model.len() != obs.len() {
        return Err(QuantileMapError::LengthMismatch {
            model: model.len(),
            obs: obs.len(),
        });
    }
    if model.is_empty() {
        return Err(QuantileMapError::EmptyReference);
    }

    let sorted_model = sorted_ascending(model);
    let sorted_obs = sorted_ascending(obs);
    let rank = nearest_rank_index(&sorted_model, forecast_total)?;

    Ok(MappedTotal {
        value: sorted_obs[rank],
        rank,
    })
}
