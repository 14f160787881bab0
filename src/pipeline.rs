// src/pipeline.rs
//! Pipeline stages, each reading and writing record files so any stage can
//! be replayed on its own.

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::dump::{read_gazetteer, WikiDump};
use crate::error::{PlaceRankError, Result};
use crate::geo;
use crate::graph::{build_graph, BuildStats};
use crate::rank::{log_preview, rank_nodes, PageRank};
use crate::stream::{read_all, write_all};
use crate::types::{GeoEntry, PageNode, RankedPageNode};

/// Outcome of the rank stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankSummary {
    pub pages: usize,
    pub iterations: usize,
    pub delta: f64,
}

/// Outcome of the join stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoSummary {
    pub found: u64,
    pub missing: u64,
    pub written: usize,
}

/// Extracts gazetteer records from a geonames dump into a record file.
///
/// # Errors
/// Returns error on I/O or decode failure.
pub fn locations(dump: &Path, dest: &Path, config: &Config) -> Result<usize> {
    let capacity = config.pipeline.queue_capacity;
    let entries = read_gazetteer(dump, capacity)?.collect_vec(0)?;
    let count = entries.len();
    info!(count, dest = %dest.display(), "writing locations");
    write_all(dest, entries, capacity)?;
    Ok(count)
}

/// Builds the link graph from a wiki dump into a page record file.
///
/// # Errors
/// Returns error on I/O or decode failure.
pub fn graph(dump: &Path, dest: &Path, config: &Config) -> Result<BuildStats> {
    let capacity = config.pipeline.queue_capacity;
    let graph = build_graph(&WikiDump::new(dump), capacity, config.report.sample_limit)?;
    info!(pages = graph.nodes.len(), dest = %dest.display(), "writing pages");
    write_all(dest, graph.nodes, capacity)?;
    Ok(graph.stats)
}

/// Ranks a page record file into a ranked-page record file.
///
/// # Errors
/// Returns error on I/O or decode failure, or an inconsistent graph.
pub fn rank_pages(graph_file: &Path, dest: &Path, config: &Config) -> Result<RankSummary> {
    let capacity = config.pipeline.queue_capacity;
    let nodes: Vec<PageNode> = read_all(graph_file, capacity)?;
    info!(pages = nodes.len(), "computing pagerank");

    let solved = PageRank::from(&config.pagerank).solve(&nodes)?;
    let summary = RankSummary {
        pages: nodes.len(),
        iterations: solved.iterations,
        delta: solved.delta,
    };
    let ranked = rank_nodes(nodes, &solved.ranks)?;
    log_preview(&ranked, config.report.preview);

    info!(dest = %dest.display(), "writing ranked pages");
    write_all(dest, ranked, capacity)?;
    Ok(summary)
}

/// Joins ranked pages with gazetteer records and writes the final output.
///
/// # Errors
/// Returns error on I/O or decode failure.
pub fn rank_geo(
    ranked_file: &Path,
    geo_file: &Path,
    dest: &Path,
    config: &Config,
) -> Result<GeoSummary> {
    let capacity = config.pipeline.queue_capacity;
    let entries: Vec<GeoEntry> = read_all(geo_file, capacity)?;
    let ranked: Vec<RankedPageNode> = read_all(ranked_file, capacity)?;

    let outcome = geo::join(&ranked, &entries, config.report.sample_limit);
    let (found, missing) = (outcome.found, outcome.missing);
    let records = outcome.into_records();
    let written = records.len();
    geo::write_geo_ranks(dest, records, capacity)?;

    Ok(GeoSummary {
        found,
        missing,
        written,
    })
}

/// Runs every stage, keeping intermediate files in `work_dir` if given,
/// else in a temporary directory removed afterwards.
///
/// # Errors
/// Returns the first stage failure.
pub fn run_all(
    wiki_dump: &Path,
    geonames_dump: &Path,
    dest: &Path,
    work_dir: Option<&Path>,
    config: &Config,
) -> Result<GeoSummary> {
    let temp;
    let dir: &Path = match work_dir {
        Some(d) => d,
        None => {
            temp = tempfile::Builder::new()
                .prefix("wiki-page-rank")
                .tempdir()
                .map_err(|e| PlaceRankError::io(&std::env::temp_dir(), e))?;
            temp.path()
        }
    };
    info!(dir = %dir.display(), "intermediate files");

    let graph_file = dir.join("1-graph.bin");
    let ranked_file = dir.join("2-page-rank.bin");
    let geo_file = dir.join("3-locations.bin");

    info!("extracting wiki graph");
    graph(wiki_dump, &graph_file, config)?;

    info!("computing pagerank for all pages");
    rank_pages(&graph_file, &ranked_file, config)?;

    info!("extracting location refs from gazetteer");
    locations(geonames_dump, &geo_file, config)?;

    info!("computing ranks for location pages");
    rank_geo(&ranked_file, &geo_file, dest, config)
}
