//! Correct command: bias-correct one run date for a set of basins.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use tracing::{info, info_span};

use prbias_calendar::RunDate;
use prbias_io::{BasinScope, BasinTable, MethodTable, NetcdfArchive, ThiessenWriter, TimeoutLoader};
use prbias_pipeline::{BasinOutcome, Pipeline};

use crate::cli::Cli;
use crate::config::PrbiasConfig;
use crate::convert;

/// Resolves the run date from the CLI, falling back to today.
fn run_date(cli: &Cli) -> Result<RunDate> {
    let today = Local::now().date_naive();
    let year = cli.year.unwrap_or(today.year());
    let month = cli.month.unwrap_or(today.month() as u8);
    RunDate::new(year, month).context("invalid --year/--month")
}

/// Run the correction batch.
pub fn run(cli: &Cli) -> Result<()> {
    let _cmd = info_span!("correct").entered();

    let config = if cli.config.exists() {
        PrbiasConfig::from_path(&cli.config)?
    } else {
        info!(path = %cli.config.display(), "config file not found, using defaults");
        PrbiasConfig::default()
    };

    let run = run_date(cli)?;
    let root = convert::data_root(&config.io, &cli.local_dir);
    let layout = convert::build_layout(&config.io, root, cli.model.name())?;
    let pipeline_cfg = convert::build_pipeline_config(&config.climatology, &config.correction)?;
    let fallback = convert::parse_method(&config.correction.default_method)?;

    let table = BasinTable::from_path(&config.io.basins).with_context(|| {
        format!("failed to read basin table: {}", config.io.basins.display())
    })?;
    let scope = BasinScope {
        macro_basins: cli.macro_basins,
        micro_basins: cli.micro,
        all_basins: cli.all_basins,
    };
    let basins = table
        .expand(cli.basin.as_deref().unwrap_or_default(), scope)
        .context("failed to resolve basins")?;

    let methods = match &config.io.methods {
        Some(path) => MethodTable::from_path(path, fallback)
            .with_context(|| format!("failed to read method table: {}", path.display()))?,
        None => MethodTable::new(fallback),
    };

    let loader = TimeoutLoader::new(
        NetcdfArchive::new(layout.clone()),
        convert::fetch_timeout(&config.io),
    );
    let writer = ThiessenWriter::new(layout.clone()).with_dry_run(cli.dry_run);

    info!(
        model = layout.model(),
        run = %run,
        root = %layout.root().display(),
        n_basins = basins.len(),
        dry_run = cli.dry_run,
        fetch_timeout_secs = loader.timeout().as_secs(),
        "starting correction"
    );
    let report = Pipeline::new(&loader, &methods, &writer, pipeline_cfg).run_batch(&basins, run);

    for basin in report.basins() {
        if let BasinOutcome::Corrected { path, leads } = basin.outcome() {
            for lead in leads {
                info!(
                    basin = basin.basin(),
                    lead = lead.lead,
                    method = %lead.method,
                    forecast_total = lead.forecast_total,
                    corrected_total = lead.corrected_total,
                    "lead summary"
                );
            }
            info!(basin = basin.basin(), path = %path.display(), "output");
        }
    }
    Ok(())
}
