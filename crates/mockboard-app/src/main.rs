//! Mockboard command-line entry point.

mod cli;
mod commands;

use clap::Parser;
use cli::CliArgs;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    log::info!("Running {:?}", args.command);

    commands::run(args)
}
