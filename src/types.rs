// src/types.rs
//! Records shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// Aggregated outgoing links from one page to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Dense id of the linked node.
    pub target: u32,
    /// Resolved occurrences of the target within the source page text.
    pub count: u32,
}

/// A page of the link graph.
///
/// `links` never contains the node's own id and every count is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    /// Dense node id assigned by the graph builder.
    pub id: u32,
    /// Page id as found in the source dump.
    pub source_id: u64,
    pub title: String,
    /// Titles of redirects pointing here, sorted.
    pub aliases: Vec<String>,
    /// Outgoing links sorted by target id.
    pub links: Vec<Link>,
}

impl PageNode {
    #[must_use]
    pub fn new(id: u32, source_id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            source_id,
            title: title.into(),
            aliases: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// A page with its solved rank and 1-based position in descending rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPageNode {
    pub page: PageNode,
    pub rank: f64,
    pub order: u32,
}

/// A gazetteer entry pointing at a wiki page by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEntry {
    pub id: u64,
    pub name: String,
    pub title: String,
}

/// Result of probing the ranked pages for one gazetteer entry.
#[derive(Debug, Clone, Copy)]
pub struct RankedGeoEntry<'a> {
    pub entry: &'a GeoEntry,
    pub page: Option<&'a RankedPageNode>,
}

impl RankedGeoEntry<'_> {
    /// Flattens a matched entry into an output record.
    #[must_use]
    pub fn to_record(&self) -> Option<GeoRankRecord> {
        self.page.map(|page| GeoRankRecord {
            id: self.entry.id,
            name: self.entry.name.clone(),
            title: self.entry.title.clone(),
            rank: page.rank,
            order: page.order,
        })
    }
}

/// One line of the final ranked-geo output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRankRecord {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub rank: f64,
    pub order: u32,
}
