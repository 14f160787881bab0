// src/bin/placerank.rs
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use placerank_core::cli::{self, Cli};
use placerank_core::exit::PlaceRankExit;

fn main() -> PlaceRankExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli::dispatch(&cli) {
        Ok(()) => PlaceRankExit::Success,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            PlaceRankExit::from_error(&e)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
