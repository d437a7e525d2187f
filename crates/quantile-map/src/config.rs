//! Correction method selection and mapping configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::QuantileMapError;

/// Bias-correction method applied to one basin and run month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CorrectionMethod {
    /// Nearest-rank empirical quantile mapping of the monthly total,
    /// disaggregated back onto the forecast days.
    #[default]
    EqmDes,
    /// No correction: the forecast passes through unchanged.
    None,
}

impl CorrectionMethod {
    /// Tag used in method tables (`"eqm_des"`, `"none"`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::EqmDes => "eqm_des",
            Self::None => "none",
        }
    }

    /// Method named by a method-table cell.
    ///
    /// Only `eqm_des` selects quantile mapping; every other tag, including
    /// names of methods this crate does not implement, passes through.
    pub fn from_table_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("eqm_des") {
            Self::EqmDes
        } else {
            Self::None
        }
    }

    /// Suffix appended to corrected output names (`"eqmdes"`, `"none"`).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::EqmDes => "eqmdes",
            Self::None => "none",
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CorrectionMethod {
    type Err = QuantileMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eqm_des" => Ok(Self::EqmDes),
            "none" => Ok(Self::None),
            other => Err(QuantileMapError::UnknownMethod {
                tag: other.to_string(),
            }),
        }
    }
}

/// What to do when a window's forecast total is zero and daily ratios are
/// undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroTotalPolicy {
    /// Emit zeros for every valid day. Missing days stay missing.
    #[default]
    Zeros,
    /// Return the forecast days unchanged.
    Passthrough,
}

impl FromStr for ZeroTotalPolicy {
    type Err = QuantileMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zeros" | "zero" => Ok(Self::Zeros),
            "passthrough" | "pass_through" => Ok(Self::Passthrough),
            other => Err(QuantileMapError::InvalidConfig {
                reason: format!("unknown zero-total policy: {other:?}"),
            }),
        }
    }
}

/// Configuration for correcting one lead window.
///
/// # Example
///
/// ```
/// use prbias_quantile_map::{QmConfig, ZeroTotalPolicy};
///
/// let config = QmConfig::new()
///     .with_zero_total(ZeroTotalPolicy::Passthrough)
///     .with_min_paired_years(20);
/// assert_eq!(config.min_paired_years(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct QmConfig {
    zero_total: ZeroTotalPolicy,
    min_paired_years: usize,
}

impl QmConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `zero_total = Zeros`, `min_paired_years = 1`.
    pub fn new() -> Self {
        Self {
            zero_total: ZeroTotalPolicy::Zeros,
            min_paired_years: 1,
        }
    }

    /// Sets the zero-total disaggregation policy.
    pub fn with_zero_total(mut self, policy: ZeroTotalPolicy) -> Self {
        self.zero_total = policy;
        self
    }

    /// Sets the minimum number of years present in both climatologies.
    pub fn with_min_paired_years(mut self, n: usize) -> Self {
        self.min_paired_years = n;
        self
    }

    /// Returns the zero-total disaggregation policy.
    pub fn zero_total(&self) -> ZeroTotalPolicy {
        self.zero_total
    }

    /// Returns the minimum number of paired climatology years.
    pub fn min_paired_years(&self) -> usize {
        self.min_paired_years
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::InvalidConfig`] if `min_paired_years` is zero.
    pub fn validate(&self) -> Result<(), QuantileMapError> {
        if self.min_paired_years == 0 {
            return Err(QuantileMapError::InvalidConfig {
                reason: "min_paired_years must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for QmConfig {
    fn default() -> Self {
        Self::new()
    }
}
