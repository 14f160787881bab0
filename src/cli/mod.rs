// src/cli/mod.rs
//! CLI command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands};

use anyhow::Result;

use crate::config::Config;

/// Runs the selected command.
///
/// # Errors
/// Returns error if configuration loading or the command fails.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Locations { source, dest } => handlers::handle_locations(source, dest, &config),
        Commands::Graph { source, dest } => handlers::handle_graph(source, dest, &config),
        Commands::Pagerank { source, dest } => handlers::handle_pagerank(source, dest, &config),
        Commands::Georank { source, geo, dest } => {
            handlers::handle_georank(source, geo, dest, &config)
        }
        Commands::All {
            wiki,
            geonames,
            dest,
            work_dir,
        } => handlers::handle_all(wiki, geonames, dest, work_dir.as_deref(), &config),
    }
}
