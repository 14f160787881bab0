// src/graph/builder.rs
//! Three-pass construction of the redirect-folded link graph.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::index::TitleIndex;
use super::links::{link_targets, strip_section};
use crate::dump::{is_filtered_namespace, PageRecord, PageSource};
use crate::error::{PlaceRankError, Result};
use crate::report::Sampler;
use crate::types::{Link, PageNode};

/// Resolution counters gathered while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub pages: u64,
    pub duplicate_titles: u64,
    pub redirects_resolved: u64,
    pub redirects_unresolved: u64,
    pub links_resolved: u64,
    pub links_unresolved: u64,
    pub self_links: u64,
}

/// The finished graph. Node `i` has id `i`.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    pub nodes: Vec<PageNode>,
    pub stats: BuildStats,
}

impl LinkGraph {
    /// Number of distinct (source, target) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.links.len()).sum()
    }
}

/// Accumulates nodes, aliases and links pass by pass.
///
/// The title index lives only as long as the builder; `finish` discards it.
pub struct GraphBuilder {
    nodes: Vec<PageNode>,
    index: TitleIndex,
    stats: BuildStats,
    redirect_misses: Sampler,
    link_misses: Sampler,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(sample_limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            index: TitleIndex::default(),
            stats: BuildStats::default(),
            redirect_misses: Sampler::new(sample_limit),
            link_misses: Sampler::new(sample_limit),
        }
    }

    /// Pass 1: creates a node for every non-redirect page.
    ///
    /// # Errors
    /// Returns `InvalidGraph` if the node count overflows the id space.
    pub fn add_page(&mut self, record: &PageRecord) -> Result<()> {
        if record.is_redirect() {
            return Ok(());
        }
        let position = self.nodes.len();
        let id = node_id(position)?;
        self.nodes.push(PageNode::new(id, record.id, record.title.as_str()));
        if self.index.insert(&record.title, position).is_some() {
            self.stats.duplicate_titles += 1;
            debug!(title = %record.title, "duplicate page title, keeping latest");
        }
        self.stats.pages += 1;
        Ok(())
    }

    /// Pass 2: folds a redirect into its target node as an alias.
    pub fn add_redirect(&mut self, record: &PageRecord) {
        let Some(raw_target) = record.redirect.as_deref().filter(|r| !r.is_empty()) else {
            return;
        };
        let target = strip_section(raw_target);
        match self.index.resolve(target) {
            Some(position) => {
                self.nodes[position].aliases.push(record.title.clone());
                self.index.insert(&record.title, position);
                self.stats.redirects_resolved += 1;
            }
            None => {
                self.stats.redirects_unresolved += 1;
                if !is_filtered_namespace(target) && self.redirect_misses.sample() {
                    warn!(
                        redirect = %record.title,
                        redirect_to = %raw_target,
                        cleaned = %target,
                        "unresolvable redirect"
                    );
                }
            }
        }
    }

    /// Pass 3: aggregates the resolved links of one non-redirect page.
    pub fn add_links(&mut self, record: &PageRecord) {
        if record.is_redirect() {
            return;
        }
        let Some(source) = self.index.resolve(&record.title) else {
            return;
        };

        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for target in link_targets(&record.text) {
            let Some(position) = self.index.resolve(target) else {
                self.stats.links_unresolved += 1;
                if self.link_misses.sample() {
                    debug!(page = %record.title, link = target, "unresolvable link");
                }
                continue;
            };
            if position == source {
                self.stats.self_links += 1;
                continue;
            }
            self.stats.links_resolved += 1;
            *counts.entry(self.nodes[position].id).or_default() += 1;
        }

        merge_links(&mut self.nodes[source].links, counts);
    }

    /// Sorts aliases and hands the nodes off; the title index is dropped.
    #[must_use]
    pub fn finish(mut self) -> LinkGraph {
        for node in &mut self.nodes {
            node.aliases.sort();
        }
        let graph = LinkGraph {
            nodes: self.nodes,
            stats: self.stats,
        };
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            titles = self.index.len(),
            "graph built"
        );
        graph
    }
}

/// Dense id for the node at `position`.
fn node_id(position: usize) -> Result<u32> {
    u32::try_from(position).map_err(|_| {
        PlaceRankError::InvalidGraph(format!("page {position} exceeds the u32 node id space"))
    })
}

/// Materializes per-target counts, merging into links already present when
/// several records share a title.
fn merge_links(links: &mut Vec<Link>, counts: BTreeMap<u32, u32>) {
    if links.is_empty() {
        links.extend(counts.into_iter().map(|(target, count)| Link { target, count }));
        return;
    }
    let mut merged: BTreeMap<u32, u32> = links.iter().map(|l| (l.target, l.count)).collect();
    for (target, count) in counts {
        *merged.entry(target).or_default() += count;
    }
    *links = merged
        .into_iter()
        .map(|(target, count)| Link { target, count })
        .collect();
}

/// Builds the graph by streaming `source` three times.
///
/// # Errors
/// Returns the first I/O or decode error from any pass.
pub fn build_graph<S>(source: &S, capacity: usize, sample_limit: usize) -> Result<LinkGraph>
where
    S: PageSource + ?Sized,
{
    let mut builder = GraphBuilder::new(sample_limit);

    info!("starting pass 1: pages");
    source.open(capacity)?.drain(|record| builder.add_page(&record))?;

    info!("starting pass 2: redirects");
    source.open(capacity)?.drain(|record| {
        builder.add_redirect(&record);
        Ok(())
    })?;

    info!("starting pass 3: links");
    source.open(capacity)?.drain(|record| {
        builder.add_links(&record);
        Ok(())
    })?;

    let graph = builder.finish();
    let s = &graph.stats;
    info!(
        pages = s.pages,
        duplicate_titles = s.duplicate_titles,
        redirects_resolved = s.redirects_resolved,
        redirects_unresolved = s.redirects_unresolved,
        links_resolved = s.links_resolved,
        links_unresolved = s.links_unresolved,
        self_links = s.self_links,
        "resolution summary"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_are_positions() {
        assert_eq!(node_id(0).unwrap(), 0);
        assert_eq!(node_id(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn exhausted_id_space_is_invalid_input() {
        let err = node_id(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, PlaceRankError::InvalidGraph(_)));
        assert!(err.is_invalid_input());
    }
}
