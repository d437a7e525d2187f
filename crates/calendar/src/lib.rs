//! # prbias-calendar
//!
//! Gregorian date arithmetic for seasonal forecast runs.
//!
//! A forecast initialised in month `M` covers the three calendar months that
//! follow it (lead 1, 2 and 3). This crate derives those lead windows, their
//! day counts (leap years included) and the `YYYYMMDD` stamps used in file
//! names.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["RunDate (year, month)"] -->|".windows()"| B["LeadWindows"]
//!     B -->|"[0..3]"| C["ForecastWindow (start, end, n_days)"]
//!     A -->|".with_year(y)"| A
//!     C -->|"date_stamp()"| D["YYYYMMDD"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use prbias_calendar::RunDate;
//!
//! let run = RunDate::new(2017, 8).unwrap();
//! let windows = run.windows().unwrap();
//! assert_eq!(windows[0].n_days(), 30); // Sep
//! assert_eq!(windows[1].n_days(), 31); // Oct
//! assert_eq!(windows[2].n_days(), 30); // Nov
//! assert_eq!(windows.total_days(), 91);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | Month lengths, leap years and month abbreviations |
//! | `run_date` | Forecast initialisation month |
//! | `window` | Lead windows derived from a run date |
//! | `stamp` | `YYYYMMDD` formatting and parsing |
//! | `error` | Error types |

mod error;
mod month;
mod run_date;
mod stamp;
mod window;

pub use error::CalendarError;
pub use month::{days_in_month, month_abbrev};
pub use run_date::RunDate;
pub use stamp::{date_stamp, parse_date_stamp};
pub use window::{ForecastWindow, LEADS, LeadWindows};
