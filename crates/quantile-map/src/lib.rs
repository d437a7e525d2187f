//! Nearest-rank empirical quantile mapping for monthly precipitation totals.
//!
//! A seasonal forecast's monthly total is located in the sorted distribution
//! of historical model (hindcast) totals and replaced by the observed total
//! of the same rank. The corrected total is then spread back over the
//! forecast days in proportion to the forecast's own daily shape.
//!
//! # Pipeline
//!
//! 1. **Total** the forecast days (missing days excluded)
//! 2. **Pair** the climatology: keep years present in both model and obs
//! 3. **Map** the total: nearest rank in sorted model → obs at that rank
//! 4. **Disaggregate**: `daily[i] / forecast_total * corrected_total`
//!
//! Windows configured with [`CorrectionMethod::None`] skip steps 2–4.
//!
//! # Glossary
//!
//! - **Hindcast**: model output re-run for past years
//! - **Climatology**: per-year historical totals for one lead window
//! - **eQM**: empirical quantile mapping
//!
//! # Quick Start
//!
//! ```
//! use prbias_quantile_map::{Climatology, CorrectionMethod, QmConfig, correct_window};
//!
//! let daily = vec![1.0, 0.0, 3.0]; // forecast days, total 4.0
//! let clim = Climatology::complete(1981, &[2.0, 4.0, 6.0], &[3.0, 6.0, 9.0]).unwrap();
//!
//! let out = correct_window(&daily, &clim, CorrectionMethod::EqmDes, &QmConfig::new()).unwrap();
//! assert_eq!(out.corrected_total(), 6.0);
//! assert_eq!(out.daily(), &[1.5, 0.0, 4.5]);
//! ```

mod climatology;
mod config;
mod disaggregate;
mod error;
mod result;
mod transform;

pub use climatology::Climatology;
pub use config::{CorrectionMethod, QmConfig, ZeroTotalPolicy};
pub use disaggregate::disaggregate;
pub use error::QuantileMapError;
pub use result::CorrectedWindow;
pub use transform::{MappedTotal, map_total, nearest_rank_index};

use prbias_stats::nansum;
use tracing::{debug, warn};

/// Corrects one lead window of daily forecast values.
///
/// # Arguments
///
/// * `daily` - Forecast days of the window (mm/day, `NaN` = missing).
/// * `climatology` - Historical model and observed totals for the window.
/// * `method` - Correction method selected for the basin and run month.
/// * `config` - Mapping configuration.
///
/// # Errors
///
/// Returns [`QuantileMapError`] if the configuration is invalid, the paired
/// climatology is shorter than `config.min_paired_years()`, or the mapping
/// fails. Pass-through never fails on data.
pub fn correct_window(
    daily: &[f64],
    climatology: &Climatology,
    method: CorrectionMethod,
    config: &QmConfig,
) -> Result<CorrectedWindow, QuantileMapError> {
    config.validate()?;
    let forecast_total = nansum(daily);

    match method {
        CorrectionMethod::None => Ok(CorrectedWindow::new(
            method,
            forecast_total,
            forecast_total,
            None,
            None,
            daily.to_vec(),
        )),
        CorrectionMethod::EqmDes => {
            let (model, obs) = climatology.paired();
            if model.is_empty() {
                return Err(QuantileMapError::EmptyReference);
            }
            if model.len() < config.min_paired_years() {
                return Err(QuantileMapError::InsufficientCoverage {
                    paired: model.len(),
                    required: config.min_paired_years(),
                });
            }

            let mapped = map_total(forecast_total, &model, &obs)?;
            debug!(
                forecast_total,
                corrected_total = mapped.value,
                rank = mapped.rank,
                n_paired = model.len(),
                "mapped window total"
            );

            let corrected =
                disaggregate(daily, forecast_total, mapped.value, config.zero_total());
            // A zero forecast total has no daily shape to rescale, so the
            // written days follow the zero-total policy instead of the mapping.
            let corrected_total = if forecast_total == 0.0 || !forecast_total.is_finite() {
                let written = nansum(&corrected);
                warn!(
                    mapped_total = mapped.value,
                    written_total = written,
                    policy = ?config.zero_total(),
                    "zero forecast total; mapped total not applied"
                );
                written
            } else {
                mapped.value
            };
            Ok(CorrectedWindow::new(
                method,
                forecast_total,
                corrected_total,
                Some(mapped.rank),
                Some(model.len()),
                corrected,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_ignores_climatology() {
        let daily = [1.0, 2.0];
        let out = correct_window(
            &daily,
            &Climatology::new(),
            CorrectionMethod::None,
            &QmConfig::new(),
        )
        .unwrap();
        assert_eq!(out.daily(), &daily);
        assert_eq!(out.corrected_total(), 3.0);
        assert_eq!(out.rank(), None);
    }

    #[test]
    fn empty_climatology_is_error() {
        let err = correct_window(
            &[1.0],
            &Climatology::new(),
            CorrectionMethod::EqmDes,
            &QmConfig::new(),
        )
        .unwrap_err();
        assert_eq!(err, QuantileMapError::EmptyReference);
    }

    #[test]
    fn insufficient_coverage_is_error() {
        let mut clim = Climatology::new();
        clim.push(1981, Some(1.0), Some(1.0));
        clim.push(1982, None, Some(1.0));
        let config = QmConfig::new().with_min_paired_years(2);
        let err = correct_window(&[1.0], &clim, CorrectionMethod::EqmDes, &config).unwrap_err();
        assert_eq!(
            err,
            QuantileMapError::InsufficientCoverage {
                paired: 1,
                required: 2
            }
        );
    }

    #[test]
    fn zero_forecast_reports_written_total() {
        let clim = Climatology::complete(1981, &[5.0, 10.0, 15.0], &[6.0, 12.0, 18.0]).unwrap();
        let daily = [0.0, f64::NAN, 0.0];

        let zeros = correct_window(&daily, &clim, CorrectionMethod::EqmDes, &QmConfig::new())
            .unwrap();
        assert_eq!(zeros.rank(), Some(0));
        assert_eq!(zeros.corrected_total(), 0.0);
        assert_eq!(prbias_stats::nansum(zeros.daily()), zeros.corrected_total());

        let config = QmConfig::new().with_zero_total(ZeroTotalPolicy::Passthrough);
        let pass = correct_window(&daily, &clim, CorrectionMethod::EqmDes, &config).unwrap();
        assert_eq!(pass.corrected_total(), 0.0);
        assert!(pass.daily()[1].is_nan());
    }

    #[test]
    fn reports_rank_and_coverage() {
        let clim = Climatology::complete(1981, &[5.0, 10.0, 15.0], &[6.0, 12.0, 18.0]).unwrap();
        let out =
            correct_window(&[4.0, 6.0], &clim, CorrectionMethod::EqmDes, &QmConfig::new())
                .unwrap();
        assert_eq!(out.rank(), Some(1));
        assert_eq!(out.n_paired(), Some(3));
        assert_eq!(out.corrected_total(), 12.0);
    }
}
