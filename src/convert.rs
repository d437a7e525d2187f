//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use prbias_io::ArchiveLayout;
use prbias_pipeline::PipelineConfig;
use prbias_quantile_map::{CorrectionMethod, QmConfig, ZeroTotalPolicy};

use crate::config::{ClimatologyToml, CorrectionToml, IoToml};

/// Parses a zero-total policy name (`zeros` or `passthrough`).
pub fn parse_zero_total(s: &str) -> Result<ZeroTotalPolicy> {
    s.parse()
        .with_context(|| format!("invalid [correction].zero_total: {s:?}"))
}

/// Parses a method tag (`eqm_des` or `none`).
pub fn parse_method(s: &str) -> Result<CorrectionMethod> {
    s.parse()
        .with_context(|| format!("invalid [correction].default_method: {s:?}"))
}

/// Archive root: `base_dir` joined with the `--local-dir` argument.
pub fn data_root(io: &IoToml, local_dir: &Path) -> PathBuf {
    io.base_dir.join(local_dir)
}

/// Per-read timeout; zero disables it.
pub fn fetch_timeout(io: &IoToml) -> Duration {
    Duration::from_secs(io.fetch_timeout_secs)
}

/// Builds an [`ArchiveLayout`] rooted at `root` for `model`.
pub fn build_layout(io: &IoToml, root: PathBuf, model: &str) -> Result<ArchiveLayout> {
    let layout = ArchiveLayout::new(root, model)
        .with_variable(&io.variable)
        .with_time_freq(&io.time_freq)
        .with_hindcast_tag(&io.hindcast_tag)
        .with_obs_dataset(&io.obs_dataset)
        .with_obs_period(&io.obs_period);
    layout.validate().context("invalid [io] naming")?;
    Ok(layout)
}

/// Builds a [`PipelineConfig`] from the climatology and correction sections.
pub fn build_pipeline_config(
    climatology: &ClimatologyToml,
    correction: &CorrectionToml,
) -> Result<PipelineConfig> {
    let qm = QmConfig::new()
        .with_zero_total(parse_zero_total(&correction.zero_total)?)
        .with_min_paired_years(climatology.min_paired_years);
    let config = PipelineConfig::new()
        .with_period(climatology.first_year, climatology.last_year)
        .with_parallel(climatology.parallel)
        .with_qm_config(qm);
    config.validate().context("invalid [climatology] settings")?;
    Ok(config)
}
