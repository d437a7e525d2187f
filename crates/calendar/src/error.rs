//! Error types for the prbias-calendar crate.

/// Error type for all fallible operations in the prbias-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a year/month cannot be represented as a calendar date.
    #[error("date out of range: {year}-{month:02}")]
    OutOfRange {
        /// Year that could not be represented.
        year: i32,
        /// Month of the rejected date.
        month: u8,
    },

    /// Returned when a `YYYYMMDD` stamp cannot be parsed.
    #[error("invalid date stamp: '{stamp}'")]
    InvalidStamp {
        /// The rejected stamp.
        stamp: String,
    },
}
