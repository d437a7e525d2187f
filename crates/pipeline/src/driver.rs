//! Per-basin correction and the batch loop.

use std::path::PathBuf;

use prbias_calendar::{LEADS, RunDate};
use prbias_io::{
    Basin, CorrectedSeries, MethodLookup, SeriesLoader, SeriesRequest, SeriesSource, SeriesWriter,
};
use prbias_quantile_map::{Climatology, CorrectionMethod, correct_window};
use prbias_stats::nansum;
use tracing::{debug, info, warn};

use crate::climatology::build_climatologies;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::report::{BasinOutcome, BasinReport, BatchReport, LeadSummary};

/// Bias-correction pipeline over a set of collaborators.
///
/// Holds no per-basin state: every call to [`Pipeline::correct_basin`]
/// starts from scratch.
pub struct Pipeline<'a> {
    loader: &'a dyn SeriesLoader,
    methods: &'a dyn MethodLookup,
    writer: &'a dyn SeriesWriter,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline reading through `loader`, choosing methods from
    /// `methods` and persisting through `writer`.
    pub fn new(
        loader: &'a dyn SeriesLoader,
        methods: &'a dyn MethodLookup,
        writer: &'a dyn SeriesWriter,
        config: PipelineConfig,
    ) -> Self {
        Self {
            loader,
            methods,
            writer,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Corrects the forecast of one basin and writes it.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the forecast is unavailable or
    /// misaligned, any lead window cannot be corrected, or the writer fails.
    /// A failing window fails the whole basin.
    #[tracing::instrument(skip_all, fields(basin = %basin.id(), run = %run))]
    pub fn correct_basin(
        &self,
        basin: &Basin,
        run: RunDate,
    ) -> Result<(PathBuf, Vec<LeadSummary>), PipelineError> {
        let windows = run.windows()?;
        let request = SeriesRequest {
            basin,
            source: SeriesSource::Forecast,
            run,
            windows,
        };
        let forecast = self.loader.load(&request).map_err(|source| {
            let kind = source.unavailable();
            warn!(%kind, error = %source, "forecast unavailable");
            PipelineError::ForecastUnavailable { kind, source }
        })?;
        let leads = forecast
            .split_leads(&windows)
            .ok_or(PipelineError::Misaligned {
                start: windows.start(),
                end: windows.end(),
            })?;
        let forecast_totals = leads.map(nansum);
        info!(?forecast_totals, "forecast totals");

        let method = self.methods.method(basin.id(), run.month());
        debug!(%method, month = run.month(), "method selected");

        let climatologies: [Climatology; LEADS] = match method {
            CorrectionMethod::EqmDes => {
                build_climatologies(self.loader, basin, run, &self.config)?
            }
            CorrectionMethod::None => Default::default(),
        };

        let mut values = Vec::with_capacity(windows.total_days());
        let mut summaries = Vec::with_capacity(LEADS);
        for ((window, days), clim) in windows.iter().zip(leads).zip(&climatologies) {
            let corrected = correct_window(days, clim, method, self.config.qm()).map_err(
                |source| PipelineError::Correction {
                    lead: window.lead(),
                    source,
                },
            )?;
            info!(
                lead = window.lead(),
                forecast_total = corrected.forecast_total(),
                corrected_total = corrected.corrected_total(),
                "corrected window"
            );
            summaries.push(LeadSummary {
                lead: window.lead(),
                method,
                forecast_total: corrected.forecast_total(),
                corrected_total: corrected.corrected_total(),
                n_paired: corrected.n_paired(),
            });
            values.extend(corrected.into_daily());
        }

        let path = self
            .writer
            .write(&CorrectedSeries {
                basin,
                run,
                windows,
                method,
                values: &values,
            })
            .map_err(PipelineError::Write)?;
        info!(path = %path.display(), "corrected series written");
        Ok((path, summaries))
    }

    /// Corrects every basin in `basins`, in order.
    ///
    /// Never fails: a basin that cannot be corrected is logged and recorded
    /// as [`BasinOutcome::Skipped`].
    pub fn run_batch(&self, basins: &[Basin], run: RunDate) -> BatchReport {
        info!(run = %run, n_basins = basins.len(), "batch start");
        let mut report = BatchReport::new(run);

        for basin in basins {
            info!(basin = basin.id(), "processing basin");
            let outcome = match self.correct_basin(basin, run) {
                Ok((path, leads)) => BasinOutcome::Corrected { path, leads },
                Err(e) => {
                    warn!(basin = basin.id(), error = %e, "basin skipped");
                    BasinOutcome::Skipped {
                        reason: e.to_string(),
                    }
                }
            };
            report.push(BasinReport::new(basin.id(), outcome));
        }

        info!(
            n_corrected = report.n_corrected(),
            n_skipped = report.n_skipped(),
            "batch finished"
        );
        report
    }
}
