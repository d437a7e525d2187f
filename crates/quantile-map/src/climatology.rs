//! Historical model and observation totals for one lead window.

use crate::error::QuantileMapError;

/// Per-year historical totals of model hindcasts and observations for one
/// lead window.
///
/// A year whose file could not be read is stored as `None` for the affected
/// source; the mapping only uses years present in both sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Climatology {
    years: Vec<i32>,
    model: Vec<Option<f64>>,
    obs: Vec<Option<f64>>,
}

impl Climatology {
    /// Creates an empty climatology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a climatology from per-year columns.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::LengthMismatch`] if `model` and `obs`
    /// differ in length, or if `years` does not match them.
    pub fn from_parts(
        years: Vec<i32>,
        model: Vec<Option<f64>>,
        obs: Vec<Option<f64>>,
    ) -> Result<Self, QuantileMapError> {
        if model.len() != obs.len() || years.len() != model.len() {
            return Err(QuantileMapError::LengthMismatch {
                model: model.len(),
                obs: obs.len(),
            });
        }
        Ok(Self { years, model, obs })
    }

    /// Builds a complete climatology (no missing years) starting at
    /// `first_year`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantileMapError::LengthMismatch`] if the columns differ in
    /// length.
    pub fn complete(
        first_year: i32,
        model: &[f64],
        obs: &[f64],
    ) -> Result<Self, QuantileMapError> {
        let years = (0..model.len() as i32).map(|i| first_year + i).collect();
        Self::from_parts(
            years,
            model.iter().copied().map(Some).collect(),
            obs.iter().copied().map(Some).collect(),
        )
    }

    /// Appends one historical year.
    pub fn push(&mut self, year: i32, model: Option<f64>, obs: Option<f64>) {
        self.years.push(year);
        self.model.push(model);
        self.obs.push(obs);
    }

    /// Historical years in insertion order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Model totals per year.
    pub fn model(&self) -> &[Option<f64>] {
        &self.model
    }

    /// Observation totals per year.
    pub fn obs(&self) -> &[Option<f64>] {
        &self.obs
    }

    /// Number of historical years attempted.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// Number of years with a finite total in both sources.
    pub fn n_paired(&self) -> usize {
        self.pairs().count()
    }

    /// Years missing from either source.
    pub fn missing_years(&self) -> Vec<i32> {
        self.years
            .iter()
            .zip(self.model.iter().zip(&self.obs))
            .filter(|(_, (m, o))| !is_present(**m) || !is_present(**o))
            .map(|(&y, _)| y)
            .collect()
    }

    /// Model and observation totals restricted to years present in both.
    pub fn paired(&self) -> (Vec<f64>, Vec<f64>) {
        self.pairs().unzip()
    }

    fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.model
            .iter()
            .zip(&self.obs)
            .filter_map(|(m, o)| match (m, o) {
                (Some(m), Some(o)) if m.is_finite() && o.is_finite() => Some((*m, *o)),
                _ => None,
            })
    }
}

fn is_present(v: Option<f64>) -> bool {
    v.is_some_and(f64::is_finite)
}
