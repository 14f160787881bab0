// src/geo/join.rs
//! Title-keyed join of gazetteer entries against ranked pages.

use std::collections::HashMap;

use tracing::info;

use crate::report::Sampler;
use crate::types::{GeoEntry, GeoRankRecord, RankedGeoEntry, RankedPageNode};

/// Every probed entry plus hit and miss totals.
#[derive(Debug)]
pub struct JoinOutcome<'a> {
    pub entries: Vec<RankedGeoEntry<'a>>,
    pub found: u64,
    pub missing: u64,
}

impl JoinOutcome<'_> {
    /// Matched entries as output records, best-ranked first.
    ///
    /// Unmatched entries are dropped. Entries sharing a page keep their
    /// gazetteer order.
    #[must_use]
    pub fn into_records(self) -> Vec<GeoRankRecord> {
        let mut records: Vec<GeoRankRecord> =
            self.entries.iter().filter_map(RankedGeoEntry::to_record).collect();
        records.sort_by_key(|r| r.order);
        records
    }
}

/// Exact-title lookup over ranked pages. Aliases are not consulted.
pub struct TitleLookup<'a> {
    pages: HashMap<&'a str, &'a RankedPageNode>,
}

impl<'a> TitleLookup<'a> {
    #[must_use]
    pub fn new(ranked: &'a [RankedPageNode]) -> Self {
        let pages = ranked.iter().map(|r| (r.page.title.as_str(), r)).collect();
        Self { pages }
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&'a RankedPageNode> {
        self.pages.get(title).copied()
    }
}

/// Probes every gazetteer entry by title.
#[must_use]
pub fn join<'a>(
    ranked: &'a [RankedPageNode],
    entries: &'a [GeoEntry],
    sample_limit: usize,
) -> JoinOutcome<'a> {
    let lookup = TitleLookup::new(ranked);
    let mut hits = Sampler::new(sample_limit);
    let mut misses = Sampler::new(sample_limit);

    let probed: Vec<RankedGeoEntry<'a>> = entries
        .iter()
        .map(|entry| {
            let page = lookup.get(&entry.title);
            if let Some(p) = page {
                if hits.sample() {
                    info!(title = %entry.title, order = p.order, "found");
                }
            } else if misses.sample() {
                info!(title = %entry.title, name = %entry.name, "missing");
            }
            RankedGeoEntry { entry, page }
        })
        .collect();

    info!(found = hits.count(), missing = misses.count(), "geo join");
    JoinOutcome {
        entries: probed,
        found: hits.count(),
        missing: misses.count(),
    }
}
