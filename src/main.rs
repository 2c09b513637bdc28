mod cli;
mod config;
mod convert;
mod designs;
mod ingest;
mod logging;
mod preprocess;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Preprocess(args) => preprocess::run(args),
    }
}
