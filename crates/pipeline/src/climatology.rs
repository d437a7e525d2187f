//! Historical climatology construction.

use prbias_calendar::{LEADS, RunDate};
use prbias_io::{Basin, SeriesLoader, SeriesRequest, SeriesSource};
use prbias_quantile_map::Climatology;
use prbias_stats::nansum;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Per-lead window totals of one source for one historical year.
type LeadTotals = [Option<f64>; LEADS];

/// Model and observed totals of one historical year.
#[derive(Debug, Clone, Copy)]
struct YearTotals {
    year: i32,
    model: LeadTotals,
    obs: LeadTotals,
}

/// Builds the model and observed climatologies of the three lead windows.
///
/// For every year of the configured period a surrogate run with the same
/// month is resolved, and the hindcast and the observation record are read
/// for its windows. Each window is reduced to a NaN-tolerant total. A year
/// whose file cannot be read, or does not line up with the windows, is
/// recorded as missing for that source only.
///
/// # Errors
///
/// Returns [`PipelineError`] only for calendar failures or an invalid
/// configuration. Read failures never abort the climatology.
#[tracing::instrument(skip_all, fields(basin = %basin.id(), run = %run))]
pub fn build_climatologies<L>(
    loader: &L,
    basin: &Basin,
    run: RunDate,
    config: &PipelineConfig,
) -> Result<[Climatology; LEADS], PipelineError>
where
    L: SeriesLoader + ?Sized,
{
    config.validate()?;
    let years = config.first_year()..=config.last_year();

    let per_year: Vec<YearTotals> = if config.parallel() {
        years
            .into_par_iter()
            .map(|year| year_totals(loader, basin, run, year))
            .collect::<Result<_, _>>()?
    } else {
        years
            .map(|year| year_totals(loader, basin, run, year))
            .collect::<Result<_, _>>()?
    };

    let mut climatologies: [Climatology; LEADS] = Default::default();
    for totals in &per_year {
        for (lead, clim) in climatologies.iter_mut().enumerate() {
            clim.push(totals.year, totals.model[lead], totals.obs[lead]);
        }
    }

    for (i, clim) in climatologies.iter().enumerate() {
        let lead = i + 1;
        info!(
            lead,
            n_paired = clim.n_paired(),
            n_years = clim.n_years(),
            "climatology coverage"
        );
        if clim.n_paired() < clim.n_years() {
            warn!(
                lead,
                missing = ?clim.missing_years(),
                "climatology incomplete"
            );
        }
    }
    Ok(climatologies)
}

fn year_totals<L>(
    loader: &L,
    basin: &Basin,
    run: RunDate,
    year: i32,
) -> Result<YearTotals, PipelineError>
where
    L: SeriesLoader + ?Sized,
{
    let surrogate = run.with_year(year)?;
    Ok(YearTotals {
        year,
        model: source_totals(loader, basin, surrogate, SeriesSource::Hindcast)?,
        obs: source_totals(loader, basin, surrogate, SeriesSource::Observation)?,
    })
}

fn source_totals<L>(
    loader: &L,
    basin: &Basin,
    run: RunDate,
    source: SeriesSource,
) -> Result<LeadTotals, PipelineError>
where
    L: SeriesLoader + ?Sized,
{
    let windows = run.windows()?;
    let request = SeriesRequest {
        basin,
        source,
        run,
        windows,
    };
    let series = match loader.load(&request) {
        Ok(series) => series,
        Err(e) => {
            warn!(
                year = run.year(),
                %source,
                kind = %e.unavailable(),
                error = %e,
                "historical year unavailable"
            );
            return Ok([None; LEADS]);
        }
    };

    match series.split_leads(&windows) {
        Some(leads) => {
            let totals = leads.map(|days| Some(nansum(days)));
            debug!(year = run.year(), %source, ?totals, "historical totals");
            Ok(totals)
        }
        None => {
            warn!(
                year = run.year(),
                %source,
                len = series.len(),
                expected = windows.total_days(),
                "historical series misaligned with lead windows"
            );
            Ok([None; LEADS])
        }
    }
}
