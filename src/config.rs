use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level prbias configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrbiasConfig {
    /// Archive layout and collaborator tables.
    #[serde(default)]
    pub io: IoToml,

    /// Historical period settings.
    #[serde(default)]
    pub climatology: ClimatologyToml,

    /// Mapping settings.
    #[serde(default)]
    pub correction: CorrectionToml,
}

impl PrbiasConfig {
    /// Reads and parses a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&text).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_time_freq")]
    pub time_freq: String,
    #[serde(default = "default_hindcast_tag")]
    pub hindcast_tag: String,
    #[serde(default = "default_obs_dataset")]
    pub obs_dataset: String,
    #[serde(default = "default_obs_period")]
    pub obs_period: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_basins")]
    pub basins: PathBuf,
    #[serde(default)]
    pub methods: Option<PathBuf>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            variable: default_variable(),
            time_freq: default_time_freq(),
            hindcast_tag: default_hindcast_tag(),
            obs_dataset: default_obs_dataset(),
            obs_period: default_obs_period(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            basins: default_basins(),
            methods: None,
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_variable() -> String {
    "pr".to_string()
}
fn default_time_freq() -> String {
    "daily".to_string()
}
fn default_hindcast_tag() -> String {
    "hind8110".to_string()
}
fn default_obs_dataset() -> String {
    "inmet_ana_chirps_merge".to_string()
}
fn default_obs_period() -> String {
    "19610101_20141231".to_string()
}
fn default_fetch_timeout_secs() -> u64 {
    60
}
fn default_basins() -> PathBuf {
    PathBuf::from("basins.toml")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyToml {
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_last_year")]
    pub last_year: i32,
    #[serde(default = "default_min_paired_years")]
    pub min_paired_years: usize,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ClimatologyToml {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
            last_year: default_last_year(),
            min_paired_years: default_min_paired_years(),
            parallel: false,
        }
    }
}

fn default_first_year() -> i32 {
    1981
}
fn default_last_year() -> i32 {
    2010
}
fn default_min_paired_years() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    #[serde(default = "default_zero_total")]
    pub zero_total: String,
    #[serde(default = "default_method")]
    pub default_method: String,
}

impl Default for CorrectionToml {
    fn default() -> Self {
        Self {
            zero_total: default_zero_total(),
            default_method: default_method(),
        }
    }
}

fn default_zero_total() -> String {
    "zeros".to_string()
}
fn default_method() -> String {
    "none".to_string()
}
