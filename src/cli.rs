use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Iris: preprocessing for delay-censored count data.
#[derive(Parser)]
#[command(
    name = "iris",
    version,
    about = "Turn long-format delay-censored counts into estimator-ready structures"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full preprocessing pipeline on a CSV of observations.
    Preprocess(PreprocessArgs),
}

/// Arguments for the `preprocess` subcommand.
#[derive(clap::Args)]
pub struct PreprocessArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "iris.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the maximum delay from config.
    #[arg(long)]
    pub max_delay: Option<usize>,
}
