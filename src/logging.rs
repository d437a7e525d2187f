use tracing_subscriber::EnvFilter;

/// Targets of the binary and every workspace library.
const CRATE_TARGETS: &[&str] = &[
    "prbias",
    "prbias_calendar",
    "prbias_io",
    "prbias_pipeline",
    "prbias_quantile_map",
    "prbias_stats",
];

/// Level for a `-v` count: none warn, `-v` info, `-vv` debug, more trace.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive enabling `level` on every workspace target only, so
/// netcdf and other dependencies stay quiet.
fn directives(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the `-v` count when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
