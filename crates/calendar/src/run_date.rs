//! Forecast initialisation month.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::month::month_abbrev;
use crate::stamp::date_stamp;
use crate::window::{ForecastWindow, LEADS, LeadWindows};

/// The calendar month in which a forecast run was initialised.
///
/// Always anchored on day 1 of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunDate {
    first: NaiveDate,
}

impl RunDate {
    /// Creates a run date for `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12,
    /// or [`CalendarError::OutOfRange`] if the date cannot be represented.
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let first = NaiveDate::from_ymd_opt(year, u32::from(month), 1)
            .ok_or(CalendarError::OutOfRange { year, month })?;
        Ok(Self { first })
    }

    /// Returns the run year.
    pub fn year(self) -> i32 {
        self.first.year()
    }

    /// Returns the run month (1..=12).
    pub fn month(self) -> u8 {
        self.first.month() as u8
    }

    /// Returns the first day of the run month.
    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// Returns the run stamp `YYYYMM01`.
    pub fn stamp(self) -> String {
        date_stamp(self.first)
    }

    /// Returns the lower-case abbreviation of the run month (e.g. `"aug"`).
    pub fn month_abbrev(self) -> &'static str {
        // The month is validated on construction.
        month_abbrev(self.month()).unwrap_or("???")
    }

    /// Returns the same calendar month in another year.
    ///
    /// Used to build the surrogate run dates of the historical hindcasts.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the date cannot be represented.
    pub fn with_year(self, year: i32) -> Result<Self, CalendarError> {
        Self::new(year, self.month())
    }

    /// Returns the year and month `n` months after this run.
    pub fn months_ahead(self, n: u8) -> (i32, u8) {
        let zero_based = i32::from(self.month()) - 1 + i32::from(n);
        let year = self.year() + zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) as u8 + 1;
        (year, month)
    }

    /// Resolves the three lead windows covered by this run.
    ///
    /// Lead `n` starts on day 1 of the month `n` months after the run and
    /// ends on the last day of that month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if a lead month cannot be
    /// represented.
    pub fn windows(self) -> Result<LeadWindows, CalendarError> {
        let mut leads = Vec::with_capacity(LEADS);
        for lead in 1..=LEADS as u8 {
            let (year, month) = self.months_ahead(lead);
            leads.push(ForecastWindow::for_month(lead, year, month)?);
        }
        LeadWindows::from_vec(leads)
    }
}

impl std::fmt::Display for RunDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}
