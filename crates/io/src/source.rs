//! The loader seam between the correction pipeline and storage.

use prbias_calendar::{LeadWindows, RunDate};

use crate::basins::Basin;
use crate::error::IoError;
use crate::series::DailySeries;

/// Origin of a requested daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesSource {
    /// The operational forecast being corrected.
    Forecast,
    /// A historical model re-run for the same calendar month.
    Hindcast,
    /// The observational archive.
    Observation,
}

impl std::fmt::Display for SeriesSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Forecast => "forecast",
            Self::Hindcast => "hindcast",
            Self::Observation => "observation",
        })
    }
}

/// A request for the daily values spanning all lead windows of one run.
#[derive(Debug, Clone, Copy)]
pub struct SeriesRequest<'a> {
    /// Basin whose Thiessen series is requested.
    pub basin: &'a Basin,
    /// Where the series comes from.
    pub source: SeriesSource,
    /// Run (or surrogate hindcast run) the windows belong to.
    pub run: RunDate,
    /// Lead windows to cover.
    pub windows: LeadWindows,
}

/// Retrieves daily series for the correction pipeline.
///
/// Implementations return exactly `windows.total_days()` values starting at
/// `windows.start()`, or an [`IoError`] whose
/// [`unavailable`](IoError::unavailable) classification tells the caller
/// why the series could not be delivered.
pub trait SeriesLoader: Send + Sync {
    /// Loads the series described by `request`.
    fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError>;
}

impl<L: SeriesLoader + ?Sized> SeriesLoader for std::sync::Arc<L> {
    fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        (**self).load(request)
    }
}

impl<L: SeriesLoader + ?Sized> SeriesLoader for &L {
    fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        (**self).load(request)
    }
}
