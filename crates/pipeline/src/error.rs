//! Error types for the prbias-pipeline crate.

use chrono::NaiveDate;
use prbias_calendar::CalendarError;
use prbias_io::{IoError, Unavailable};
use prbias_quantile_map::QuantileMapError;

/// Error type for all fallible operations in the prbias-pipeline crate.
///
/// Every variant is scoped to a single basin. The batch driver turns them
/// into [`BasinOutcome::Skipped`](crate::BasinOutcome::Skipped) entries and
/// moves on.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Calendar arithmetic failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Invalid mapping configuration.
    #[error(transparent)]
    QuantileMap(#[from] QuantileMapError),

    /// Returned when the current forecast cannot be read.
    #[error("forecast unavailable ({kind}): {source}")]
    ForecastUnavailable {
        /// Classification of the failure.
        kind: Unavailable,
        /// The underlying read error.
        source: IoError,
    },

    /// Returned when a loaded forecast does not line up with the lead windows.
    #[error("forecast series does not cover {start}..={end} exactly")]
    Misaligned {
        /// First day of the first lead window.
        start: NaiveDate,
        /// Last day of the last lead window.
        end: NaiveDate,
    },

    /// Returned when one lead window cannot be corrected.
    #[error("lead {lead}: {source}")]
    Correction {
        /// Lead number (1..=3).
        lead: u8,
        /// The mapping failure.
        source: QuantileMapError,
    },

    /// Returned when the corrected series cannot be written.
    #[error("output not written: {0}")]
    Write(IoError),

    /// Returned when the climatology period is empty.
    #[error("invalid climatology period: {first_year}..={last_year}")]
    InvalidPeriod {
        /// First historical year.
        first_year: i32,
        /// Last historical year.
        last_year: i32,
    },
}
