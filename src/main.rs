mod cli;
mod config;
mod convert;
mod correct;
mod logging;

use std::process;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = correct::run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
