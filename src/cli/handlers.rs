// src/cli/handlers.rs
//! Command handlers: run one pipeline stage and print its summary.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::pipeline;

fn done(stage: &str, detail: &str) {
    println!("{} {}", format!("✓ {stage}:").green().bold(), detail);
}

/// Handles `locations`.
pub fn handle_locations(source: &Path, dest: &Path, config: &Config) -> Result<()> {
    let count = pipeline::locations(source, dest, config)
        .with_context(|| format!("extracting locations from {}", source.display()))?;
    done("locations", &format!("{count} entries with wiki links"));
    Ok(())
}

/// Handles `graph`.
pub fn handle_graph(source: &Path, dest: &Path, config: &Config) -> Result<()> {
    let stats = pipeline::graph(source, dest, config)
        .with_context(|| format!("building graph from {}", source.display()))?;
    done(
        "graph",
        &format!(
            "{} pages, {} redirects folded ({} unresolved), {} links resolved ({} unresolved)",
            stats.pages,
            stats.redirects_resolved,
            stats.redirects_unresolved,
            stats.links_resolved,
            stats.links_unresolved
        ),
    );
    Ok(())
}

/// Handles `pagerank`.
pub fn handle_pagerank(source: &Path, dest: &Path, config: &Config) -> Result<()> {
    let summary = pipeline::rank_pages(source, dest, config)
        .with_context(|| format!("ranking pages from {}", source.display()))?;
    done(
        "pagerank",
        &format!(
            "{} pages, converged after {} iterations (delta {:e})",
            summary.pages, summary.iterations, summary.delta
        ),
    );
    Ok(())
}

/// Handles `georank`.
pub fn handle_georank(source: &Path, geo: &Path, dest: &Path, config: &Config) -> Result<()> {
    let summary = pipeline::rank_geo(source, geo, dest, config)
        .with_context(|| format!("joining {} with {}", source.display(), geo.display()))?;
    print_geo_summary(&summary);
    Ok(())
}

/// Handles `all`.
pub fn handle_all(
    wiki: &Path,
    geonames: &Path,
    dest: &Path,
    work_dir: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let summary = pipeline::run_all(wiki, geonames, dest, work_dir, config)
        .context("running full pipeline")?;
    print_geo_summary(&summary);
    Ok(())
}

fn print_geo_summary(summary: &pipeline::GeoSummary) {
    done(
        "georank",
        &format!(
            "{} found, {} missing, {} written",
            summary.found,
            summary.missing.to_string().yellow(),
            summary.written
        ),
    );
}
