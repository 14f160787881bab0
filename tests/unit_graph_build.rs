// tests/unit_graph_build.rs
//! Tests for redirect-folded link graph construction.

use placerank_core::dump::PageRecord;
use placerank_core::graph::{build_graph, GraphBuilder, LinkGraph};
use placerank_core::types::{Link, PageNode};

fn build(records: Vec<PageRecord>) -> LinkGraph {
    build_graph(&records, 4, 10).unwrap()
}

fn node<'a>(graph: &'a LinkGraph, title: &str) -> &'a PageNode {
    graph
        .nodes
        .iter()
        .rev()
        .find(|n| n.title == title)
        .unwrap_or_else(|| panic!("no node titled {title}"))
}

fn count_to(graph: &LinkGraph, from: &str, to: &str) -> u32 {
    let target = node(graph, to).id;
    node(graph, from)
        .links
        .iter()
        .find(|l| l.target == target)
        .map_or(0, |l| l.count)
}

#[test]
fn test_redirect_becomes_alias() {
    let graph = build(vec![
        PageRecord::page(1, "NewName", "Body"),
        PageRecord::redirect(2, "OldName", "NewName#Section"),
    ]);
    assert_eq!(graph.nodes.len(), 1, "redirect must not create a node");
    assert_eq!(node(&graph, "NewName").aliases, vec!["OldName".to_string()]);
    assert!(graph.nodes.iter().all(|n| n.title != "OldName"));
    assert_eq!(graph.stats.redirects_resolved, 1);
}

#[test]
fn test_unresolved_redirect_is_dropped() {
    let graph = build(vec![
        PageRecord::page(1, "A", ""),
        PageRecord::redirect(2, "B", "Missing"),
    ]);
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.nodes[0].aliases.is_empty());
    assert_eq!(graph.stats.redirects_unresolved, 1);
}

#[test]
fn test_link_multiplicity_is_aggregated() {
    let graph = build(vec![
        PageRecord::page(1, "A", "[[B]] then [[B|again]] and [[B#Part]] plus [[C]]"),
        PageRecord::page(2, "B", ""),
        PageRecord::page(3, "C", ""),
    ]);
    let a = node(&graph, "A");
    assert_eq!(a.links.len(), 2, "one entry per distinct target");
    assert_eq!(count_to(&graph, "A", "B"), 3);
    assert_eq!(count_to(&graph, "A", "C"), 1);
    assert!(a.links.iter().all(|l| l.count >= 1));
}

#[test]
fn test_links_follow_aliases() {
    let graph = build(vec![
        PageRecord::page(1, "Target", ""),
        PageRecord::redirect(2, "Alias", "Target"),
        PageRecord::page(3, "Source", "[[Alias]] and [[Target]]"),
    ]);
    assert_eq!(count_to(&graph, "Source", "Target"), 2);
}

#[test]
fn test_self_links_are_skipped() {
    let graph = build(vec![
        PageRecord::page(1, "Loop", "[[Loop]] [[Me]] [[Other]]"),
        PageRecord::redirect(2, "Me", "Loop"),
        PageRecord::page(3, "Other", ""),
    ]);
    for n in &graph.nodes {
        assert!(n.links.iter().all(|l| l.target != n.id), "{} links to itself", n.title);
    }
    assert_eq!(graph.stats.self_links, 2);
    assert_eq!(count_to(&graph, "Loop", "Other"), 1);
}

#[test]
fn test_unresolved_links_are_dropped() {
    let graph = build(vec![PageRecord::page(1, "A", "[[Nowhere]] [[Elsewhere|x]]")]);
    assert!(graph.nodes[0].links.is_empty());
    assert_eq!(graph.stats.links_unresolved, 2);
}

#[test]
fn test_duplicate_title_last_write_wins() {
    let graph = build(vec![
        PageRecord::page(1, "Dup", "first"),
        PageRecord::page(2, "Dup", "second"),
        PageRecord::page(3, "Linker", "[[Dup]]"),
    ]);
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.stats.duplicate_titles, 1);
    let latest = node(&graph, "Dup");
    assert_eq!(latest.source_id, 2);
    assert_eq!(node(&graph, "Linker").links, vec![Link { target: latest.id, count: 1 }]);
}

#[test]
fn test_aliases_are_sorted_and_ids_dense() {
    let graph = build(vec![
        PageRecord::page(10, "Hub", ""),
        PageRecord::redirect(11, "Zeta", "Hub"),
        PageRecord::redirect(12, "Alpha", "Hub"),
        PageRecord::page(20, "Leaf", "[[Hub]]"),
    ]);
    assert_eq!(node(&graph, "Hub").aliases, vec!["Alpha", "Zeta"]);
    let ids: Vec<u32> = graph.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn test_builder_passes_can_be_driven_directly() {
    let records = [
        PageRecord::page(1, "X", "[[Y]]"),
        PageRecord::page(2, "Y", "[[X]] [[X]]"),
    ];
    let mut builder = GraphBuilder::new(0);
    for r in &records {
        builder.add_page(r).unwrap();
    }
    for r in &records {
        builder.add_redirect(r);
    }
    for r in &records {
        builder.add_links(r);
    }
    let graph = builder.finish();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(count_to(&graph, "Y", "X"), 2);
}
