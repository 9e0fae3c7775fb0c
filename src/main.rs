mod aggregate_cmd;
mod cli;
mod config;
mod convert;
mod convert_cmd;
mod extract_cmd;
mod logging;
mod quality_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::HydrotsConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = HydrotsConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Convert(args) => convert_cmd::run(args, &config),
        Command::Aggregate(args) => aggregate_cmd::run(args, &config),
        Command::Quality(args) => quality_cmd::run(args),
        Command::Extract(args) => extract_cmd::run(args, &config),
    }
}
