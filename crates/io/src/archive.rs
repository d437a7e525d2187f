//! [`SeriesLoader`] backed by the NetCDF Thiessen archive.

use std::path::Path;

use tracing::debug;

use crate::error::IoError;
use crate::layout::ArchiveLayout;
use crate::netcdf_read;
use crate::series::DailySeries;
use crate::source::{SeriesLoader, SeriesRequest, SeriesSource};

/// Name of the time coordinate in Thiessen files.
const TIME_VAR: &str = "time";

/// Reads forecast, hindcast and observation series from the archive.
#[derive(Debug, Clone)]
pub struct NetcdfArchive {
    layout: ArchiveLayout,
}

impl NetcdfArchive {
    /// Creates an archive reader over `layout`.
    pub fn new(layout: ArchiveLayout) -> Self {
        Self { layout }
    }

    /// Returns the archive layout.
    pub fn layout(&self) -> &ArchiveLayout {
        &self.layout
    }

    /// Reads a forecast/hindcast file whose first value is the first lead day.
    fn read_run_file(&self, path: &Path, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        let file = netcdf_read::open_file(path)?;
        let mut values = netcdf_read::read_1d_f64(&file, &[self.layout.variable()], path)?;

        let expected = request.windows.total_days();
        if values.len() < expected {
            return Err(IoError::TooShort {
                path: path.to_path_buf(),
                expected,
                got: values.len(),
            });
        }
        values.truncate(expected);
        Ok(DailySeries::new(request.windows.start(), values))
    }

    /// Slices the long observation record by its time axis.
    fn read_obs_record(&self, path: &Path, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        let file = netcdf_read::open_file(path)?;
        let offsets = netcdf_read::read_1d_f64(&file, &[TIME_VAR], path)?;
        let (unit, base) = netcdf_read::read_time_units(&file, TIME_VAR, path)?;
        let dates = netcdf_read::time_offsets_to_dates(base, unit, &offsets)?;

        let start = request.windows.start();
        let end = request.windows.end();
        let out_of_record = || IoError::OutOfRecord {
            path: path.to_path_buf(),
            start,
            end,
        };
        let first = dates.iter().position(|&d| d == start).ok_or_else(out_of_record)?;
        let last = dates.iter().position(|&d| d == end).ok_or_else(out_of_record)?;

        let expected = request.windows.total_days();
        if last < first || last - first + 1 != expected {
            return Err(IoError::TooShort {
                path: path.to_path_buf(),
                expected,
                got: (last + 1).saturating_sub(first),
            });
        }

        let values = netcdf_read::read_1d_f64(&file, &[self.layout.variable()], path)?;
        if values.len() != dates.len() {
            return Err(IoError::TooShort {
                path: path.to_path_buf(),
                expected: dates.len(),
                got: values.len(),
            });
        }
        Ok(DailySeries::new(start, values[first..=last].to_vec()))
    }
}

impl SeriesLoader for NetcdfArchive {
    fn load(&self, request: &SeriesRequest<'_>) -> Result<DailySeries, IoError> {
        let path = self.layout.series_path(
            request.source,
            request.basin,
            request.run,
            &request.windows,
        );
        debug!(source = %request.source, path = %path.display(), "reading series");
        match request.source {
            SeriesSource::Forecast | SeriesSource::Hindcast => self.read_run_file(&path, request),
            SeriesSource::Observation => self.read_obs_record(&path, request),
        }
    }
}
