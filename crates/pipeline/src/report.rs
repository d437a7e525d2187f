//! Batch outcome reporting.

use std::path::PathBuf;

use prbias_calendar::RunDate;
use prbias_quantile_map::CorrectionMethod;

/// Totals of one corrected lead window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadSummary {
    /// Lead number (1..=3).
    pub lead: u8,
    /// Method applied to the window.
    pub method: CorrectionMethod,
    /// NaN-tolerant total of the raw forecast.
    pub forecast_total: f64,
    /// Total after correction.
    pub corrected_total: f64,
    /// Years used by the mapping, `None` for pass-through.
    pub n_paired: Option<usize>,
}

/// What happened to one basin.
#[derive(Debug, Clone, PartialEq)]
pub enum BasinOutcome {
    /// The corrected series was produced and handed to the writer.
    Corrected {
        /// Where the writer put the series.
        path: PathBuf,
        /// Per-lead totals, in lead order.
        leads: Vec<LeadSummary>,
    },
    /// The basin was skipped; the batch carried on.
    Skipped {
        /// Human-readable cause.
        reason: String,
    },
}

/// Outcome of one basin within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BasinReport {
    basin: String,
    outcome: BasinOutcome,
}

impl BasinReport {
    pub(crate) fn new(basin: impl Into<String>, outcome: BasinOutcome) -> Self {
        Self {
            basin: basin.into(),
            outcome,
        }
    }

    /// Basin id.
    pub fn basin(&self) -> &str {
        &self.basin
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> &BasinOutcome {
        &self.outcome
    }

    /// Returns `true` if the basin was corrected.
    pub fn is_corrected(&self) -> bool {
        matches!(self.outcome, BasinOutcome::Corrected { .. })
    }
}

/// Per-basin outcomes of one batch run, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    run: RunDate,
    basins: Vec<BasinReport>,
}

impl BatchReport {
    pub(crate) fn new(run: RunDate) -> Self {
        Self {
            run,
            basins: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, report: BasinReport) {
        self.basins.push(report);
    }

    /// Forecast run the batch processed.
    pub fn run(&self) -> RunDate {
        self.run
    }

    /// Returns all basin reports.
    pub fn basins(&self) -> &[BasinReport] {
        &self.basins
    }

    /// Report of `basin_id`, if it was part of the batch.
    pub fn get(&self, basin_id: &str) -> Option<&BasinReport> {
        self.basins.iter().find(|r| r.basin == basin_id)
    }

    /// Number of corrected basins.
    pub fn n_corrected(&self) -> usize {
        self.basins.iter().filter(|r| r.is_corrected()).count()
    }

    /// Number of skipped basins.
    pub fn n_skipped(&self) -> usize {
        self.basins.len() - self.n_corrected()
    }
}
