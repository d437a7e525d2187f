//! Result type for one corrected lead window.

use crate::config::CorrectionMethod;

/// A forecast window after bias correction.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedWindow {
    /// Method that produced the result.
    method: CorrectionMethod,
    /// NaN-tolerant sum of the forecast days.
    forecast_total: f64,
    /// Total after mapping (equal to `forecast_total` for pass-through).
    corrected_total: f64,
    /// Rank matched in the model distribution, if mapping ran.
    rank: Option<usize>,
    /// Years available in both climatologies, if mapping ran.
    n_paired: Option<usize>,
    /// Corrected daily values.
    daily: Vec<f64>,
}

impl CorrectedWindow {
    pub(crate) fn new(
        method: CorrectionMethod,
        forecast_total: f64,
        corrected_total: f64,
        rank: Option<usize>,
        n_paired: Option<usize>,
        daily: Vec<f64>,
    ) -> Self {
        Self {
            method,
            forecast_total,
            corrected_total,
            rank,
            n_paired,
            daily,
        }
    }

    /// Returns the method applied.
    pub fn method(&self) -> CorrectionMethod {
        self.method
    }

    /// Returns the uncorrected forecast total.
    pub fn forecast_total(&self) -> f64 {
        self.forecast_total
    }

    /// Returns the corrected total.
    pub fn corrected_total(&self) -> f64 {
        self.corrected_total
    }

    /// Returns the matched rank, or `None` for pass-through.
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Returns the number of paired climatology years, or `None` for
    /// pass-through.
    pub fn n_paired(&self) -> Option<usize> {
        self.n_paired
    }

    /// Returns the corrected daily values.
    pub fn daily(&self) -> &[f64] {
        &self.daily
    }

    /// Consumes `self` and returns the corrected daily values.
    pub fn into_daily(self) -> Vec<f64> {
        self.daily
    }
}
