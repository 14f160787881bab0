// src/rank/mod.rs
//! Rank solving and dense ordering.

pub mod pagerank;
pub mod ranker;

pub use pagerank::{IterationReport, PageRank, RankVector};
pub use ranker::{log_preview, preview, rank_nodes, PreviewRow};

use crate::error::Result;
use crate::types::{PageNode, RankedPageNode};

/// Solves ranks for `nodes` and returns them in descending rank order.
///
/// # Errors
/// Returns `InvalidGraph` if the node set is inconsistent.
pub fn rank_pages(nodes: Vec<PageNode>, solver: &PageRank) -> Result<Vec<RankedPageNode>> {
    let solved = solver.solve(&nodes)?;
    rank_nodes(nodes, &solved.ranks)
}
