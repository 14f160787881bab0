// tests/unit_pagerank.rs
//! Tests for the power-iteration solver.

use placerank_core::error::PlaceRankError;
use placerank_core::rank::PageRank;
use placerank_core::types::{Link, PageNode};

fn graph(edges: &[&[u32]]) -> Vec<PageNode> {
    edges
        .iter()
        .enumerate()
        .map(|(i, targets)| {
            let id = u32::try_from(i).unwrap();
            let mut n = PageNode::new(id, u64::from(id), format!("P{i}"));
            n.links = targets.iter().map(|&t| Link { target: t, count: 1 }).collect();
            n
        })
        .collect()
}

#[test]
fn test_empty_graph_yields_nothing() {
    let solved = PageRank::default().solve(&[]).unwrap();
    assert!(solved.ranks.is_empty());
    assert_eq!(solved.iterations, 0);
}

#[test]
fn test_edgeless_graph_converges_in_one_iteration() {
    let nodes = graph(&[&[], &[], &[], &[]]);
    let solved = PageRank::default().solve(&nodes).unwrap();
    assert_eq!(solved.iterations, 1);
    assert!(solved.delta.abs() < 1e-15);
    for r in &solved.ranks {
        assert!((r - 0.25).abs() < 1e-12);
    }
}

#[test]
fn test_three_cycle_is_uniform() {
    let nodes = graph(&[&[1], &[2], &[0]]);
    let solved = PageRank::default().solve(&nodes).unwrap();
    for r in &solved.ranks {
        assert!((r - 1.0 / 3.0).abs() < 1e-6, "rank {r}");
    }
}

#[test]
fn test_every_iteration_is_a_distribution() {
    // Star with a dangling hub and a chain feeding it.
    let nodes = graph(&[&[4], &[4], &[4, 0], &[2, 1, 0], &[]]);
    let mut seen = 0;
    let solved = PageRank::default()
        .solve_with(&nodes, |report| {
            seen += 1;
            let sum: f64 = report.ranks.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "iteration {} sums to {sum}", report.iteration);
            assert!(report.ranks.iter().all(|&r| r >= 0.0));
        })
        .unwrap();
    assert_eq!(seen, solved.iterations);
    assert!(solved.delta <= PageRank::default().convergence);
}

#[test]
fn test_linked_node_outranks_sources() {
    let nodes = graph(&[&[2], &[2], &[]]);
    let solved = PageRank::default().solve(&nodes).unwrap();
    assert!(solved.ranks[2] > solved.ranks[0]);
    assert!((solved.ranks[0] - solved.ranks[1]).abs() < 1e-12);
}

#[test]
fn test_link_counts_do_not_weight_the_split() {
    let mut weighted = graph(&[&[1, 2], &[], &[]]);
    weighted[0].links[0].count = 9;
    let solved = PageRank::default().solve(&weighted).unwrap();
    assert!((solved.ranks[1] - solved.ranks[2]).abs() < 1e-12);
}

#[test]
fn test_unknown_link_target_is_rejected() {
    let nodes = graph(&[&[7]]);
    let err = PageRank::default().solve(&nodes).unwrap_err();
    assert!(matches!(err, PlaceRankError::InvalidGraph(_)));
}

#[test]
fn test_custom_walk_probability() {
    let nodes = graph(&[&[1], &[]]);
    let lazy = PageRank {
        walk_probability: 0.5,
        convergence: 1e-9,
    };
    let eager = PageRank {
        walk_probability: 0.95,
        convergence: 1e-9,
    };
    let low = lazy.solve(&nodes).unwrap();
    let high = eager.solve(&nodes).unwrap();
    assert!(high.ranks[1] > low.ranks[1]);
}
