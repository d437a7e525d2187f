use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Seasonal precipitation forecast bias correction.
#[derive(Parser)]
#[command(
    name = "prbias",
    version,
    about = "Quantile-mapping bias correction of seasonal precipitation forecasts"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "prbias.toml")]
    pub config: PathBuf,

    /// Forecast initialisation month (1-12). Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub month: Option<u8>,

    /// Forecast initialisation year. Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Data directory, relative to `[io].base_dir`.
    #[arg(long, default_value = ".")]
    pub local_dir: PathBuf,

    /// Forecast model.
    #[arg(long, value_enum, default_value_t = Model::Rsm2008)]
    pub model: Model,

    /// Basin id from the basin table.
    #[arg(long, required_unless_present_any = ["macro_basins", "all_basins"])]
    pub basin: Option<String>,

    /// Process every macro-basin.
    #[arg(long = "macro")]
    pub macro_basins: bool,

    /// Process every micro-basin of `--basin`.
    #[arg(long, requires = "basin")]
    pub micro: bool,

    /// Process every macro-basin followed by its micro-basins.
    #[arg(long)]
    pub all_basins: bool,

    /// Run the correction without writing output files.
    #[arg(long)]
    pub dry_run: bool,
}

/// Supported forecast models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Model {
    /// Regional Spectral Model, 2008 configuration.
    Rsm2008,
}

impl Model {
    /// Directory and file-name token of the model.
    pub fn name(self) -> &'static str {
        match self {
            Model::Rsm2008 => "rsm2008",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let cli = Cli::try_parse_from([
            "prbias", "-vv", "--month", "8", "--year", "2017", "--local-dir", "data", "--basin",
            "jaguaribe", "--micro", "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.month, Some(8));
        assert_eq!(cli.year, Some(2017));
        assert_eq!(cli.local_dir, PathBuf::from("data"));
        assert_eq!(cli.model, Model::Rsm2008);
        assert_eq!(cli.basin.as_deref(), Some("jaguaribe"));
        assert!(cli.micro && cli.dry_run);
        assert!(!cli.macro_basins && !cli.all_basins);
    }

    #[test]
    fn basin_required_without_scope() {
        assert!(Cli::try_parse_from(["prbias"]).is_err());
        assert!(Cli::try_parse_from(["prbias", "--all-basins"]).is_ok());
        assert!(Cli::try_parse_from(["prbias", "--macro"]).is_ok());
    }

    #[test]
    fn month_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["prbias", "--basin", "b", "--month", "13"]).is_err());
    }

    #[test]
    fn unknown_model_rejected() {
        assert!(Cli::try_parse_from(["prbias", "--basin", "b", "--model", "eta"]).is_err());
    }
}
