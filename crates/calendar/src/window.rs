//! Lead windows derived from a run date.

use std::ops::{Index, Range};

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::month::days_in_month;

/// Number of lead months covered by one forecast run.
pub const LEADS: usize = 3;

/// One calendar month covered by a forecast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastWindow {
    lead: u8,
    start: NaiveDate,
    end: NaiveDate,
    n_days: usize,
}

impl ForecastWindow {
    /// Builds the window for lead `lead` covering `year`/`month`.
    pub(crate) fn for_month(lead: u8, year: i32, month: u8) -> Result<Self, CalendarError> {
        let last_day = days_in_month(year, month)?;
        let start = NaiveDate::from_ymd_opt(year, u32::from(month), 1)
            .ok_or(CalendarError::OutOfRange { year, month })?;
        let end = NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(last_day))
            .ok_or(CalendarError::OutOfRange { year, month })?;
        Ok(Self {
            lead,
            start,
            end,
            n_days: usize::from(last_day),
        })
    }

    /// Returns the lead (1..=3).
    pub fn lead(&self) -> u8 {
        self.lead
    }

    /// Returns the first day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the window (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of days in the window.
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Returns the calendar year of the window.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Returns the calendar month of the window (1..=12).
    pub fn month(&self) -> u8 {
        self.start.month() as u8
    }

    /// Returns `true` if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The three consecutive lead windows of one forecast run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeadWindows {
    windows: [ForecastWindow; LEADS],
}

impl LeadWindows {
    pub(crate) fn from_vec(leads: Vec<ForecastWindow>) -> Result<Self, CalendarError> {
        let windows: [ForecastWindow; LEADS] =
            leads.try_into().map_err(|v: Vec<ForecastWindow>| {
                let (year, month) = v
                    .first()
                    .map(|w| (w.year(), w.month()))
                    .unwrap_or((0, 0));
                CalendarError::OutOfRange { year, month }
            })?;
        Ok(Self { windows })
    }

    /// Iterates over the windows in lead order.
    pub fn iter(&self) -> std::slice::Iter<'_, ForecastWindow> {
        self.windows.iter()
    }

    /// Returns the first day of lead 1.
    pub fn start(&self) -> NaiveDate {
        self.windows[0].start
    }

    /// Returns the last day of lead 3.
    pub fn end(&self) -> NaiveDate {
        self.windows[LEADS - 1].end
    }

    /// Returns the total number of days spanned by all leads.
    pub fn total_days(&self) -> usize {
        self.windows.iter().map(|w| w.n_days).sum()
    }

    /// Index ranges of each lead within the concatenated daily series.
    pub fn ranges(&self) -> [Range<usize>; LEADS] {
        let mut offset = 0;
        self.windows.map(|w| {
            let range = offset..offset + w.n_days;
            offset += w.n_days;
            range
        })
    }
}

impl Index<usize> for LeadWindows {
    type Output = ForecastWindow;

    fn index(&self, idx: usize) -> &ForecastWindow {
        &self.windows[idx]
    }
}

impl<'a> IntoIterator for &'a LeadWindows {
    type Item = &'a ForecastWindow;
    type IntoIter = std::slice::Iter<'a, ForecastWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}
