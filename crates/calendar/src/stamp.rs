//! `YYYYMMDD` date stamps used in Thiessen file names.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Formats `date` as `YYYYMMDD`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parses a `YYYYMMDD` stamp.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidStamp`] if `stamp` is not eight digits
/// forming a valid date.
pub fn parse_date_stamp(stamp: &str) -> Result<NaiveDate, CalendarError> {
    if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidStamp {
            stamp: stamp.to_string(),
        });
    }
    NaiveDate::parse_from_str(stamp, "%Y%m%d").map_err(|_| CalendarError::InvalidStamp {
        stamp: stamp.to_string(),
    })
}
