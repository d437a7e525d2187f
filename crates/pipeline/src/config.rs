//! Pipeline configuration.

use prbias_quantile_map::QmConfig;

use crate::error::PipelineError;

/// Configuration of the climatology period and the per-window correction.
///
/// # Example
///
/// ```
/// use prbias_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_period(1991, 2020)
///     .with_parallel(true);
/// assert_eq!(config.n_years(), 30);
/// ```
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    first_year: i32,
    last_year: i32,
    parallel: bool,
    qm: QmConfig,
}

impl PipelineConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: hindcast period 1981..=2010, sequential year fetches,
    /// [`QmConfig::default`].
    pub fn new() -> Self {
        Self {
            first_year: 1981,
            last_year: 2010,
            parallel: false,
            qm: QmConfig::default(),
        }
    }

    /// Sets the historical period (inclusive).
    pub fn with_period(mut self, first_year: i32, last_year: i32) -> Self {
        self.first_year = first_year;
        self.last_year = last_year;
        self
    }

    /// Fetch historical years on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the mapping configuration.
    pub fn with_qm_config(mut self, qm: QmConfig) -> Self {
        self.qm = qm;
        self
    }

    /// Returns the first historical year.
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Returns the last historical year.
    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    /// Number of years in the historical period.
    pub fn n_years(&self) -> usize {
        (self.last_year - self.first_year + 1).max(0) as usize
    }

    /// Returns whether historical years are fetched in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the mapping configuration.
    pub fn qm(&self) -> &QmConfig {
        &self.qm
    }

    /// Validates the period and the mapping configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidPeriod`] if `first_year > last_year`,
    /// or the mapping configuration error.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.first_year > self.last_year {
            return Err(PipelineError::InvalidPeriod {
                first_year: self.first_year,
                last_year: self.last_year,
            });
        }
        self.qm.validate()?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
