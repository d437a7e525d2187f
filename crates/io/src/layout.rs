//! Directory and file naming of the Thiessen series archive.

use std::path::PathBuf;

use prbias_calendar::{LeadWindows, RunDate, date_stamp};

use crate::basins::Basin;
use crate::error::IoError;
use crate::source::SeriesSource;

/// Naming convention of the Thiessen archive.
///
/// Forecasts and hindcasts live under
/// `{root}/{model}/{hindcast_tag}/{mon}/{freq}/{var}_thiessen/{basin_dir}/`,
/// observations under
/// `{root}/{obs_dataset}/calibration/{freq}/{var}_thiessen/{basin_dir}/`, and
/// corrected output in the sibling `{var}_thiessen_cor` directory.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
    model: String,
    variable: String,
    time_freq: String,
    hindcast_tag: String,
    obs_dataset: String,
    obs_period: String,
}

impl ArchiveLayout {
    /// Creates a layout rooted at `root` for `model` with default names
    /// (`pr`, `daily`, `hind8110`, `inmet_ana_chirps_merge`,
    /// `19610101_20141231`).
    pub fn new(root: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            model: model.into(),
            variable: "pr".into(),
            time_freq: "daily".into(),
            hindcast_tag: "hind8110".into(),
            obs_dataset: "inmet_ana_chirps_merge".into(),
            obs_period: "19610101_20141231".into(),
        }
    }

    /// Set the variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time frequency tag.
    pub fn with_time_freq(mut self, freq: impl Into<String>) -> Self {
        self.time_freq = freq.into();
        self
    }

    /// Set the hindcast period tag.
    pub fn with_hindcast_tag(mut self, tag: impl Into<String>) -> Self {
        self.hindcast_tag = tag.into();
        self
    }

    /// Set the observation dataset name.
    pub fn with_obs_dataset(mut self, name: impl Into<String>) -> Self {
        self.obs_dataset = name.into();
        self
    }

    /// Set the observation period tag.
    pub fn with_obs_period(mut self, period: impl Into<String>) -> Self {
        self.obs_period = period.into();
        self
    }

    /// Returns the archive root.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Returns the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the time frequency tag.
    pub fn time_freq(&self) -> &str {
        &self.time_freq
    }

    /// Returns the hindcast period tag.
    pub fn hindcast_tag(&self) -> &str {
        &self.hindcast_tag
    }

    /// Validates that no name component is empty or contains a path
    /// separator.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Table`] naming the offending component.
    pub fn validate(&self) -> Result<(), IoError> {
        let parts = [
            ("model", &self.model),
            ("variable", &self.variable),
            ("time_freq", &self.time_freq),
            ("hindcast_tag", &self.hindcast_tag),
            ("obs_dataset", &self.obs_dataset),
            ("obs_period", &self.obs_period),
        ];
        for (name, value) in parts {
            if value.is_empty() || value.contains('/') || value.contains('\\') {
                return Err(IoError::Table {
                    path: self.root.clone(),
                    reason: format!("{name} must be a non-empty single path component"),
                });
            }
        }
        Ok(())
    }

    /// Path of the series file for `source`.
    ///
    /// Forecast and hindcast files are named after the run and its lead span;
    /// the observation record is a single long file per basin.
    pub fn series_path(
        &self,
        source: SeriesSource,
        basin: &Basin,
        run: RunDate,
        windows: &LeadWindows,
    ) -> PathBuf {
        match source {
            SeriesSource::Forecast | SeriesSource::Hindcast => self
                .model_dir(run, "thiessen", basin)
                .join(self.fcst_file_name(basin, run, windows, "")),
            SeriesSource::Observation => self
                .root
                .join(&self.obs_dataset)
                .join("calibration")
                .join(&self.time_freq)
                .join(format!("{}_thiessen", self.variable))
                .join(basin.dir_name())
                .join(format!(
                    "{}_{}_{}_obs_{}_thiessen_{}.nc",
                    self.variable,
                    self.time_freq,
                    self.obs_dataset,
                    self.obs_period,
                    basin.full_name()
                )),
        }
    }

    /// Directory receiving corrected output for `basin`.
    pub fn output_dir(&self, basin: &Basin, run: RunDate) -> PathBuf {
        self.model_dir(run, "thiessen_cor", basin)
    }

    /// Path of the corrected output file.
    pub fn output_path(
        &self,
        basin: &Basin,
        run: RunDate,
        windows: &LeadWindows,
        method_suffix: &str,
    ) -> PathBuf {
        self.output_dir(basin, run).join(self.fcst_file_name(
            basin,
            run,
            windows,
            &format!("_cor_{method_suffix}"),
        ))
    }

    fn model_dir(&self, run: RunDate, kind: &str, basin: &Basin) -> PathBuf {
        self.root
            .join(&self.model)
            .join(&self.hindcast_tag)
            .join(run.month_abbrev())
            .join(&self.time_freq)
            .join(format!("{}_{kind}", self.variable))
            .join(basin.dir_name())
    }

    fn fcst_file_name(
        &self,
        basin: &Basin,
        run: RunDate,
        windows: &LeadWindows,
        suffix: &str,
    ) -> String {
        format!(
            "{}_{}_{}_{}_fcst_{}_{}_{}_thiessen_{}{suffix}.nc",
            self.variable,
            self.time_freq,
            self.model,
            self.hindcast_tag,
            run.stamp(),
            date_stamp(windows.start()),
            date_stamp(windows.end()),
            basin.full_name()
        )
    }
}
