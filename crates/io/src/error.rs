//! Error types for prbias-io.

use std::path::PathBuf;

/// Why a requested daily series could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The file does not exist.
    Missing,
    /// The file exists but its content could not be used.
    Malformed,
    /// The read did not finish within the fetch timeout.
    TimedOut,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::TimedOut => "timed out",
        })
    }
}

/// Error type for all fallible operations in the prbias-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a series is shorter than the window it must cover.
    #[error("series too short in {}: expected {expected} days, got {got}", path.display())]
    TooShort {
        /// Path of the short series.
        path: PathBuf,
        /// Days required by the lead windows.
        expected: usize,
        /// Days present in the file.
        got: usize,
    },

    /// Returned when a time value cannot be parsed or is out of range.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when the requested dates are not covered by a record.
    #[error("{} does not cover {start}..={end}", path.display())]
    OutOfRecord {
        /// Path of the record.
        path: PathBuf,
        /// First requested date.
        start: chrono::NaiveDate,
        /// Last requested date.
        end: chrono::NaiveDate,
    },

    /// Returned when a read exceeded the fetch timeout.
    #[error("read of {target} timed out after {secs} s")]
    Timeout {
        /// Description of the series being read.
        target: String,
        /// Timeout in seconds.
        secs: u64,
    },

    /// Wraps an error originating from the prbias-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when a basin or method table cannot be read or parsed.
    #[error("invalid table {}: {reason}", path.display())]
    Table {
        /// Path of the table.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a basin id is absent from the basin table.
    #[error("unknown basin: '{name}'")]
    UnknownBasin {
        /// The requested basin id.
        name: String,
    },

    /// Returned when an output file or directory cannot be written.
    #[error("failed to write {}: {reason}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

impl IoError {
    /// Classifies a read failure.
    pub fn unavailable(&self) -> Unavailable {
        match self {
            Self::FileNotFound { .. } => Unavailable::Missing,
            Self::Timeout { .. } => Unavailable::TimedOut,
            _ => Unavailable::Malformed,
        }
    }
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<prbias_calendar::CalendarError> for IoError {
    fn from(e: prbias_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_too_short() {
        let err = IoError::TooShort {
            path: PathBuf::from("/data/fcst.nc"),
            expected: 91,
            got: 60,
        };
        assert_eq!(
            err.to_string(),
            "series too short in /data/fcst.nc: expected 91 days, got 60"
        );
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "pr".to_string(),
            path: PathBuf::from("/data/obs.nc"),
        };
        assert_eq!(err.to_string(), "variable 'pr' not found in /data/obs.nc");
    }

    #[test]
    fn display_unknown_basin() {
        let err = IoError::UnknownBasin {
            name: "amazonas".to_string(),
        };
        assert_eq!(err.to_string(), "unknown basin: 'amazonas'");
    }

    #[test]
    fn classification() {
        let missing = IoError::FileNotFound {
            path: PathBuf::from("a.nc"),
        };
        let timeout = IoError::Timeout {
            target: "hindcast jaguaribe 1981-08".to_string(),
            secs: 5,
        };
        let malformed = IoError::Netcdf {
            reason: "bad header".to_string(),
        };
        assert_eq!(missing.unavailable(), Unavailable::Missing);
        assert_eq!(timeout.unavailable(), Unavailable::TimedOut);
        assert_eq!(malformed.unavailable(), Unavailable::Malformed);
        assert_eq!(Unavailable::TimedOut.to_string(), "timed out");
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_calendar_error() {
        let cal_err = prbias_calendar::CalendarError::InvalidMonth { month: 0 };
        let err: IoError = cal_err.into();
        assert!(matches!(err, IoError::Calendar { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
