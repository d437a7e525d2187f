//! Corrected-series output in the Thiessen storage convention.

use std::path::{Path, PathBuf};

use prbias_calendar::{LeadWindows, RunDate};
use prbias_quantile_map::CorrectionMethod;
use tracing::info;

use crate::basins::Basin;
use crate::error::IoError;
use crate::layout::ArchiveLayout;

/// One basin's corrected forecast, ready to persist.
#[derive(Debug, Clone, Copy)]
pub struct CorrectedSeries<'a> {
    /// Basin the series belongs to.
    pub basin: &'a Basin,
    /// Forecast run.
    pub run: RunDate,
    /// Lead windows covered by `values`.
    pub windows: LeadWindows,
    /// Method that produced the series.
    pub method: CorrectionMethod,
    /// Corrected daily values for all leads, back to back.
    pub values: &'a [f64],
}

/// Persists corrected series.
pub trait SeriesWriter: Send + Sync {
    /// Writes `series` and returns where it went.
    fn write(&self, series: &CorrectedSeries<'_>) -> Result<PathBuf, IoError>;
}

/// Writes NetCDF files next to the uncorrected Thiessen series.
#[derive(Debug, Clone)]
pub struct ThiessenWriter {
    layout: ArchiveLayout,
    dry_run: bool,
}

impl ThiessenWriter {
    /// Creates a writer over `layout`.
    pub fn new(layout: ArchiveLayout) -> Self {
        Self {
            layout,
            dry_run: false,
        }
    }

    /// When set, resolves output paths without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl SeriesWriter for ThiessenWriter {
    fn write(&self, series: &CorrectedSeries<'_>) -> Result<PathBuf, IoError> {
        let expected = series.windows.total_days();
        if series.values.len() != expected {
            return Err(IoError::TooShort {
                path: self.layout.output_dir(series.basin, series.run),
                expected,
                got: series.values.len(),
            });
        }

        let path = self.layout.output_path(
            series.basin,
            series.run,
            &series.windows,
            series.method.suffix(),
        );
        if self.dry_run {
            info!(path = %path.display(), "dry run: skipping write");
            return Ok(path);
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| IoError::Write {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        write_netcdf(&path, self.layout.variable(), series)?;
        info!(path = %path.display(), n_days = expected, "wrote corrected series");
        Ok(path)
    }
}

fn write_netcdf(path: &Path, variable: &str, series: &CorrectedSeries<'_>) -> Result<(), IoError> {
    let n = series.values.len();
    let mut file = netcdf::create(path)?;

    file.add_attribute("init_date", series.run.stamp().as_str())?;
    file.add_attribute("basin", series.basin.full_name())?;
    file.add_attribute("method", series.method.tag())?;

    file.add_dimension("time", n)?;
    {
        let offsets: Vec<f64> = (0..n).map(|t| t as f64).collect();
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_attribute(
            "units",
            format!("days since {} 00:00:00", series.windows.start().format("%Y-%m-%d")),
        )?;
        var.put_attribute("calendar", "standard")?;
        var.put_values(&offsets, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>(variable, &["time"])?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_attribute("units", "mm")?;
        var.put_values(series.values, ..)?;
    }
    Ok(())
}
