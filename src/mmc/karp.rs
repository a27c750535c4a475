// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Karp's minimum mean cycle algorithm.
//!
//! # Algorithm
//!
//! 1. Trim vertices without incoming or outgoing arcs, repeatedly. They lie
//!    on no cycle, and afterwards every remaining vertex ends walks of every
//!    length.
//! 2. With `D_k(v)` the minimum weight of a walk of exactly `k` arcs ending
//!    at `v` (starting anywhere), the minimum mean is
//!
//!    ```text
//!    λ* = min_v max_{0 <= k < n} (D_n(v) - D_k(v)) / (n - k)
//!    ```
//!
//!    The table is computed twice, one row at a time, so memory stays linear:
//!    the first pass yields `D_n`, the second evaluates the ratios.
//! 3. With `λ* = p/q`, reweight every arc to `w·q - p`. No cycle is negative
//!    under these weights, so Bellman-Ford converges to potentials `d`. Every
//!    minimum mean cycle has total reweighted cost zero and consists of
//!    tight arcs (`d(u) + w' = d(v)`); conversely any cycle of tight arcs has
//!    mean exactly `λ*`. A depth-first search over tight arcs returns one.
//!
//! All arithmetic is exact; ratios are compared by cross-multiplication.

use crate::mmc::cyclic::{compare_ratios, CyclicCore};
use crate::mmc::{MeanCycle, MeanCycleSolver, WeightedArc};
use num_rational::Rational64;
use std::cmp::Ordering;

const UNREACHED: i64 = i64::MAX;

#[derive(Debug, Clone, Copy, Default)]
pub struct KarpSolver;

impl KarpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MeanCycleSolver for KarpSolver {
    fn solve(&self, node_count: usize, arcs: &[WeightedArc]) -> Option<MeanCycle> {
        let core = CyclicCore::new(node_count, arcs);
        if core.nodes == 0 {
            return None;
        }
        log::debug!(
            "[KarpSolver] {} of {} vertices and {} of {} arcs can lie on a cycle",
            core.nodes,
            node_count,
            core.arcs.len(),
            arcs.len()
        );

        let mean = core.minimum_mean();
        let local = core.tight_cycle(*mean.numer(), *mean.denom());
        let cycle = MeanCycle {
            arcs: local.into_iter().map(|a| core.caller_index[a]).collect(),
            mean,
        };
        debug_assert!(cycle.is_closed_walk(arcs));
        debug_assert_eq!(
            Rational64::new(cycle.total_weight(arcs), cycle.len() as i64),
            mean
        );
        Some(cycle)
    }
}

impl CyclicCore {
    /// One step of the walk recurrence: `next[v] = min over u→v of prev[u] + w`.
    fn relax(&self, prev: &[i64], next: &mut [i64]) {
        next.fill(UNREACHED);
        for arc in &self.arcs {
            let from = prev[arc.source];
            if from != UNREACHED {
                let candidate = from + arc.weight;
                if candidate < next[arc.target] {
                    next[arc.target] = candidate;
                }
            }
        }
    }

    fn minimum_mean(&self) -> Rational64 {
        let n = self.nodes;
        let mut prev = vec![0i64; n];
        let mut next = vec![UNREACHED; n];
        for _ in 0..n {
            self.relax(&prev, &mut next);
            std::mem::swap(&mut prev, &mut next);
        }
        let walks_n = prev;

        // Ratios as (numerator, positive denominator).
        let mut worst: Vec<Option<(i64, i64)>> = vec![None; n];
        let mut prev = vec![0i64; n];
        for k in 0..n {
            for v in 0..n {
                if walks_n[v] == UNREACHED || prev[v] == UNREACHED {
                    continue;
                }
                let ratio = (walks_n[v] - prev[v], (n - k) as i64);
                if worst[v].map_or(true, |w| compare_ratios(ratio, w) == Ordering::Greater) {
                    worst[v] = Some(ratio);
                }
            }
            self.relax(&prev, &mut next);
            std::mem::swap(&mut prev, &mut next);
        }

        let (numerator, denominator) = worst
            .into_iter()
            .flatten()
            .min_by(|&a, &b| compare_ratios(a, b))
            .expect("a trimmed non-empty graph ends walks of every length");
        Rational64::new(numerator, denominator)
    }

    /// A cycle of tight arcs under the reweighting `w·q - p`, as local arc indices.
    fn tight_cycle(&self, p: i64, q: i64) -> Vec<usize> {
        let n = self.nodes;
        let reduced: Vec<i64> = self.arcs.iter().map(|arc| arc.weight * q - p).collect();

        let mut potential = vec![0i64; n];
        let mut converged = false;
        for _ in 0..=n {
            let mut changed = false;
            for (arc, &cost) in self.arcs.iter().zip(&reduced) {
                let candidate = potential[arc.source] + cost;
                if candidate < potential[arc.target] {
                    potential[arc.target] = candidate;
                    changed = true;
                }
            }
            if !changed {
                converged = true;
                break;
            }
        }
        assert!(converged, "cycle with mean below the computed minimum {}/{}", p, q);

        let mut tight = vec![Vec::new(); n];
        for (index, (arc, &cost)) in self.arcs.iter().zip(&reduced).enumerate() {
            if potential[arc.source] + cost == potential[arc.target] {
                tight[arc.source].push(index);
            }
        }

        // 0 = unvisited, 1 = on the DFS stack, 2 = finished.
        let mut state = vec![0u8; n];
        for root in 0..n {
            if state[root] != 0 {
                continue;
            }
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            let mut path: Vec<usize> = Vec::new();
            state[root] = 1;
            while let Some(top) = stack.last_mut() {
                let v = top.0;
                if top.1 == tight[v].len() {
                    state[v] = 2;
                    stack.pop();
                    path.pop();
                    continue;
                }
                let index = tight[v][top.1];
                top.1 += 1;
                let target = self.arcs[index].target;
                match state[target] {
                    0 => {
                        state[target] = 1;
                        path.push(index);
                        stack.push((target, 0));
                    }
                    1 => {
                        let start = stack
                            .iter()
                            .position(|&(u, _)| u == target)
                            .expect("vertices marked on-stack are on the stack");
                        let mut cycle = path[start..].to_vec();
                        cycle.push(index);
                        return cycle;
                    }
                    _ => {}
                }
            }
        }
        panic!("no tight cycle for the minimum mean {}/{}", p, q);
    }
}
