//! Daily series tagged with a start date.

use chrono::{Duration, NaiveDate};
use prbias_calendar::{LEADS, LeadWindows};
use prbias_stats::{WindowTotal, window_total};

/// A contiguous daily precipitation series.
///
/// Missing days are stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl DailySeries {
    /// Creates a series starting on `start`.
    pub fn new(start: NaiveDate, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    /// Returns the first date.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last date, or `None` for an empty series.
    pub fn end(&self) -> Option<NaiveDate> {
        let n = self.values.len() as i64;
        (n > 0).then(|| self.start + Duration::days(n - 1))
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no days.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the daily values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// NaN-tolerant total of the whole series.
    pub fn total(&self) -> WindowTotal {
        window_total(&self.values)
    }

    /// Splits a series covering `windows` into one slice per lead.
    ///
    /// Returns `None` unless the series starts on the first lead day and has
    /// exactly `windows.total_days()` values.
    pub fn split_leads(&self, windows: &LeadWindows) -> Option<[&[f64]; LEADS]> {
        if self.start != windows.start() || self.values.len() != windows.total_days() {
            return None;
        }
        Some(windows.ranges().map(|r| &self.values[r]))
    }
}
