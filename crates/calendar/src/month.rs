//! Month lengths and names on the Gregorian calendar.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Lower-case English month abbreviations, indexed by month - 1.
const MONTH_ABBREV: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Number of days in `month` of `year`, accounting for leap years.
///
/// Computed as the distance from the first of the month to the first of
/// the following month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12, or
/// [`CalendarError::OutOfRange`] if either boundary date cannot be
/// represented.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let out_of_range = || CalendarError::OutOfRange { year, month };
    let first = NaiveDate::from_ymd_opt(year, u32::from(month), 1).ok_or_else(out_of_range)?;
    let next = if month == 12 {
        year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, u32::from(month) + 1, 1)
    }
    .ok_or_else(out_of_range)?;
    u8::try_from(next.signed_duration_since(first).num_days()).map_err(|_| out_of_range())
}

/// Lower-case three-letter abbreviation of `month` (`"jan"`..`"dec"`).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_abbrev(month: u8) -> Result<&'static str, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok(MONTH_ABBREV[(month - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(2016, 2).unwrap(), 29);
        assert_eq!(days_in_month(2017, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
    }

    #[test]
    fn december_and_thirty_day_months() {
        assert_eq!(days_in_month(2017, 12).unwrap(), 31);
        assert_eq!(days_in_month(1999, 12).unwrap(), 31);
        assert_eq!(days_in_month(2017, 4).unwrap(), 30);
        assert_eq!(days_in_month(2017, 11).unwrap(), 30);
    }

    #[test]
    fn unrepresentable_year_rejected() {
        assert_eq!(
            days_in_month(i32::MAX, 12).unwrap_err(),
            CalendarError::OutOfRange {
                year: i32::MAX,
                month: 12
            }
        );
    }

    #[test]
    fn year_has_365_or_366_days() {
        for (year, expected) in [(1900, 365), (1981, 365), (1984, 366), (2000, 366), (2010, 365)] {
            let total: u32 = (1..=12)
                .map(|m| u32::from(days_in_month(year, m).unwrap()))
                .sum();
            assert_eq!(total, expected, "year {year}");
        }
    }

    #[test]
    fn invalid_month_rejected() {
        assert_eq!(
            days_in_month(2017, 0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            month_abbrev(13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn abbreviations() {
        assert_eq!(month_abbrev(1).unwrap(), "jan");
        assert_eq!(month_abbrev(8).unwrap(), "aug");
        assert_eq!(month_abbrev(12).unwrap(), "dec");
    }
}
