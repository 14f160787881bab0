// src/rank/ranker.rs
//! Dense ordering of ranked pages.

use tracing::info;

use crate::error::{PlaceRankError, Result};
use crate::types::{PageNode, RankedPageNode};

/// One line of the top-ranked diagnostic preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub order: u32,
    pub title: String,
    pub rank: f64,
    pub links: usize,
    pub aliases: usize,
}

/// Pairs each node with its rank, sorts by descending rank (stable, so equal
/// ranks keep input order) and assigns 1-based `order`.
///
/// # Errors
/// Returns `InvalidGraph` if `ranks` and `nodes` differ in length.
pub fn rank_nodes(nodes: Vec<PageNode>, ranks: &[f64]) -> Result<Vec<RankedPageNode>> {
    if nodes.len() != ranks.len() {
        return Err(PlaceRankError::InvalidGraph(format!(
            "{} nodes but {} ranks",
            nodes.len(),
            ranks.len()
        )));
    }

    let mut ranked: Vec<RankedPageNode> = nodes
        .into_iter()
        .zip(ranks)
        .map(|(page, &rank)| RankedPageNode {
            page,
            rank,
            order: 0,
        })
        .collect();

    ranked.sort_by(|a, b| b.rank.total_cmp(&a.rank));

    for (i, node) in ranked.iter_mut().enumerate() {
        node.order = u32::try_from(i + 1)
            .map_err(|_| PlaceRankError::InvalidGraph("rank order exceeds u32".into()))?;
    }
    Ok(ranked)
}

/// The first `limit` ranked pages, summarised.
#[must_use]
pub fn preview(ranked: &[RankedPageNode], limit: usize) -> Vec<PreviewRow> {
    ranked
        .iter()
        .take(limit)
        .map(|r| PreviewRow {
            order: r.order,
            title: r.page.title.clone(),
            rank: r.rank,
            links: r.page.links.len(),
            aliases: r.page.aliases.len(),
        })
        .collect()
}

/// Logs the top `limit` ranked pages.
pub fn log_preview(ranked: &[RankedPageNode], limit: usize) {
    if limit == 0 {
        return;
    }
    info!("top {limit} (order, title, rank, links, aliases)");
    for row in preview(ranked, limit) {
        info!(
            "{} {} {:.10} {} {}",
            row.order, row.title, row.rank, row.links, row.aliases
        );
    }
}
