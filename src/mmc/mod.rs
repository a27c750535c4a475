// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimum mean cycle.
//!
//! A solver receives a finite directed graph as a node count and a list of
//! weighted arcs, and returns a closed walk whose mean arc weight
//! `(sum of weights) / (number of arcs)` is minimal over all cycles, or
//! `None` when the graph is acyclic.
//!
//! The density optimizer only depends on [`MeanCycleSolver`].
//! [`HowardSolver`] is the implementation used by the binary;
//! [`KarpSolver`] runs in a guaranteed `O(n·m)` and serves as a reference.

mod cyclic;
pub mod howard;
pub mod karp;

pub use howard::HowardSolver;
pub use karp::KarpSolver;

use num_rational::Rational64;

/// A directed arc `source → target` with an integer weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedArc {
    pub source: usize,
    pub target: usize,
    pub weight: i64,
}

impl WeightedArc {
    pub const fn new(source: usize, target: usize, weight: i64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// A cycle given as indices into the solver's arc list, in walk order.
///
/// `arcs[i].target == arcs[i + 1].source`, and the last arc returns to the
/// source of the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeanCycle {
    pub arcs: Vec<usize>,
    pub mean: Rational64,
}

impl MeanCycle {
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Sum of the weights of the cycle's arcs.
    pub fn total_weight(&self, arcs: &[WeightedArc]) -> i64 {
        self.arcs.iter().map(|&a| arcs[a].weight).sum()
    }

    /// Whether consecutive arcs chain into a closed walk.
    pub fn is_closed_walk(&self, arcs: &[WeightedArc]) -> bool {
        !self.arcs.is_empty()
            && self
                .arcs
                .iter()
                .zip(self.arcs.iter().cycle().skip(1))
                .all(|(&a, &b)| arcs[a].target == arcs[b].source)
    }
}

/// Minimum-mean-cycle collaborator of the density optimizer.
pub trait MeanCycleSolver {
    /// A cycle of minimum mean weight, or `None` if the graph has no cycle.
    fn solve(&self, node_count: usize, arcs: &[WeightedArc]) -> Option<MeanCycle>;
}
