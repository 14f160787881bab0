// src/rank/pagerank.rs
//! Power-iteration `PageRank` with uniform redistribution of leaked mass.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::PageRankConfig;
use crate::error::{PlaceRankError, Result};
use crate::types::PageNode;

pub const WALK_PROBABILITY: f64 = 0.85;
pub const CONVERGENCE: f64 = 0.000_001;

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRank {
    /// Fraction of mass following links (β).
    pub walk_probability: f64,
    /// Stop once the L1 delta between iterations is at most this (ε).
    pub convergence: f64,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            walk_probability: WALK_PROBABILITY,
            convergence: CONVERGENCE,
        }
    }
}

impl From<&PageRankConfig> for PageRank {
    fn from(config: &PageRankConfig) -> Self {
        Self {
            walk_probability: config.walk_probability,
            convergence: config.convergence,
        }
    }
}

/// Solved ranks, indexed like the input node slice.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVector {
    pub ranks: Vec<f64>,
    pub iterations: usize,
    /// L1 delta of the last iteration.
    pub delta: f64,
}

/// State handed to an observer after each iteration.
#[derive(Debug)]
pub struct IterationReport<'a> {
    pub iteration: usize,
    pub delta: f64,
    pub ranks: &'a [f64],
}

/// Outgoing adjacency in compressed rows over dense positions.
struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    fn build(nodes: &[PageNode]) -> Result<Self> {
        let positions: HashMap<u32, usize> =
            nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        if positions.len() != nodes.len() {
            return Err(PlaceRankError::InvalidGraph("duplicate node ids".into()));
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut targets = Vec::with_capacity(nodes.iter().map(|n| n.links.len()).sum());
        offsets.push(0);
        for node in nodes {
            for link in &node.links {
                let position = positions.get(&link.target).ok_or_else(|| {
                    PlaceRankError::InvalidGraph(format!(
                        "node {} links to unknown node {}",
                        node.id, link.target
                    ))
                })?;
                targets.push(*position);
            }
            offsets.push(targets.len());
        }
        Ok(Self { offsets, targets })
    }

    fn out(&self, i: usize) -> &[usize] {
        &self.targets[self.offsets[i]..self.offsets[i + 1]]
    }
}

impl PageRank {
    /// Ranks `nodes`.
    ///
    /// # Errors
    /// Returns `InvalidGraph` if ids are duplicated or a link points outside
    /// the node set.
    pub fn solve(&self, nodes: &[PageNode]) -> Result<RankVector> {
        self.solve_with(nodes, |_| {})
    }

    /// Ranks `nodes`, calling `observe` after every iteration.
    ///
    /// Each node with outgoing links spreads `β·rank/outdegree` to every
    /// distinct target; link multiplicity does not weight the split. The
    /// mass missing from the result (teleport share plus dangling nodes) is
    /// then spread evenly over all nodes.
    ///
    /// # Errors
    /// Returns `InvalidGraph` if ids are duplicated or a link points outside
    /// the node set.
    #[allow(clippy::cast_precision_loss)]
    pub fn solve_with<F>(&self, nodes: &[PageNode], mut observe: F) -> Result<RankVector>
    where
        F: FnMut(&IterationReport<'_>),
    {
        let n = nodes.len();
        if n == 0 {
            return Ok(RankVector {
                ranks: Vec::new(),
                iterations: 0,
                delta: 0.0,
            });
        }

        info!(
            beta = self.walk_probability,
            epsilon = self.convergence,
            nodes = n,
            "ranking"
        );
        let adjacency = Adjacency::build(nodes)?;
        let size = n as f64;

        let mut last = vec![1.0 / size; n];
        let mut current = vec![0.0; n];
        let mut iteration = 0;

        loop {
            iteration += 1;
            current.fill(0.0);

            for (i, rank) in last.iter().enumerate() {
                let out = adjacency.out(i);
                if out.is_empty() {
                    continue;
                }
                let contribution = self.walk_probability * rank / out.len() as f64;
                for &target in out {
                    current[target] += contribution;
                }
            }

            let accumulated: f64 = current.iter().sum();
            let leaked = (1.0 - accumulated) / size;
            let mut delta = 0.0;
            for (cur, prev) in current.iter_mut().zip(&last) {
                *cur += leaked;
                delta += (*cur - prev).abs();
            }

            observe(&IterationReport {
                iteration,
                delta,
                ranks: &current,
            });
            debug!(iteration, delta, "pagerank iteration");

            std::mem::swap(&mut last, &mut current);
            if delta <= self.convergence {
                info!(iterations = iteration, delta, "pagerank converged");
                return Ok(RankVector {
                    ranks: last,
                    iterations: iteration,
                    delta,
                });
            }
        }
    }
}
