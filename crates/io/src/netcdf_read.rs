//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Unit of a CF time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Days,
    Hours,
}

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// `_FillValue` and `missing_value` entries are replaced by `NaN`. If no
/// alias matches, returns [`IoError::MissingVariable`] with the first alias
/// as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            let mut values = var.get_values::<f64, _>(..)?;
            for attr in ["_FillValue", "missing_value"] {
                if let Some(fill) = numeric_attribute(&var, attr) {
                    mask_fill(&mut values, fill);
                }
            }
            return Ok(values);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// Replace every occurrence of `fill` with `NaN`.
pub(crate) fn mask_fill(values: &mut [f64], fill: f64) {
    if fill.is_nan() {
        return;
    }
    let tol = fill.abs() * 1e-6;
    for v in values.iter_mut() {
        if (*v - fill).abs() <= tol {
            *v = f64::NAN;
        }
    }
}

/// Read the `units` attribute of a time variable.
///
/// Parses CF-convention strings like `"days since YYYY-MM-DD"` or
/// `"hours since YYYY-MM-DD HH:MM:SS"` and returns the unit together with
/// the parsed base date.
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(TimeUnit, NaiveDate), IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_time_units(&units_str)
}

/// Parse a CF time-units string.
pub(crate) fn parse_time_units(units: &str) -> Result<(TimeUnit, NaiveDate), IoError> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        });
    }

    let unit = match parts[0] {
        "days" | "day" => TimeUnit::Days,
        "hours" | "hour" => TimeUnit::Hours,
        other => {
            return Err(IoError::InvalidTime {
                reason: format!("unsupported time unit: '{other}'"),
            });
        }
    };

    // Only the date portion matters for daily data; accept unpadded dates.
    let date_str = parts[2].split([' ', 'T']).next().unwrap_or(parts[2]);
    let base_date =
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base date '{date_str}': {e}"),
        })?;

    Ok((unit, base_date))
}

/// Convert time offsets from a base date into Gregorian dates.
///
/// Offsets are floored to whole days, so a negative fraction lands on the
/// previous day.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    unit: TimeUnit,
    offsets: &[f64],
) -> Result<Vec<NaiveDate>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            let days = match unit {
                TimeUnit::Days => offset.floor() as i64,
                TimeUnit::Hours => (offset / 24.0).floor() as i64,
            };
            base_date
                .checked_add_signed(TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })
        })
        .collect()
}
