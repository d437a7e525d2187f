//! Error types for the prbias-quantile-map crate.

/// Error type for all fallible operations in the prbias-quantile-map crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when the reference (model) distribution has no values.
    #[error("empty reference distribution")]
    EmptyReference,

    /// Returned when model and observation climatologies differ in length.
    #[error("climatology length mismatch: model has {model} values, obs has {obs}")]
    LengthMismatch {
        /// Number of model climatology values.
        model: usize,
        /// Number of observation climatology values.
        obs: usize,
    },

    /// Returned when fewer years than required are present in both sources.
    #[error("insufficient climatology coverage: {paired} paired years (need {required})")]
    InsufficientCoverage {
        /// Years present in both model and observation climatologies.
        paired: usize,
        /// Minimum required paired years.
        required: usize,
    },

    /// Returned when the forecast total to be mapped is not finite.
    #[error("forecast total is not finite: {value}")]
    NonFiniteForecast {
        /// The rejected total.
        value: f64,
    },

    /// Returned when a method tag is not recognised.
    #[error("unknown correction method: '{tag}'")]
    UnknownMethod {
        /// The unrecognised tag.
        tag: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
