// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Howard's policy iteration for the minimum mean cycle.
//!
//! After trimming, the graph is split into strongly connected components
//! and each component with an arc is solved on its own:
//!
//! 1. A policy picks one outgoing arc per vertex, initially the lightest.
//!    The policy graph is functional, so every walk along it ends in a
//!    cycle; the cycle of least mean `λ = p/q` is the current candidate.
//! 2. Distances to that cycle are computed under the reweighting `w·q - p`,
//!    first along the policy tree feeding the cycle, then by reverse
//!    breadth-first search for the rest of the component, which also
//!    repoints those vertices' policy arcs.
//! 3. Any arc `u → v` with `d(v) + w' < d(u)` replaces `u`'s policy arc.
//!    When no arc improves, `d` is a feasible potential, so no cycle of the
//!    component has mean below `λ`.
//!
//! Typically a handful of rounds suffice, each linear in the arc count.
//! All arithmetic is on integers.

use crate::mmc::cyclic::{compare_ratios, CyclicCore};
use crate::mmc::{MeanCycle, MeanCycleSolver, WeightedArc};
use num_rational::Rational64;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default)]
pub struct HowardSolver;

impl HowardSolver {
    pub fn new() -> Self {
        Self
    }
}

impl MeanCycleSolver for HowardSolver {
    fn solve(&self, node_count: usize, arcs: &[WeightedArc]) -> Option<MeanCycle> {
        let core = CyclicCore::new(node_count, arcs);
        if core.nodes == 0 {
            return None;
        }
        let (count, component) = core.strongly_connected_components();
        log::debug!(
            "[HowardSolver] {} of {} vertices and {} of {} arcs can lie on a cycle, in {} components",
            core.nodes,
            node_count,
            core.arcs.len(),
            arcs.len(),
            count
        );

        let mut groups: Vec<Component> = (0..count).map(|_| Component::default()).collect();
        let mut local_id = vec![0usize; core.nodes];
        for v in 0..core.nodes {
            let group = &mut groups[component[v]];
            local_id[v] = group.nodes;
            group.nodes += 1;
        }
        for (index, arc) in core.arcs.iter().enumerate() {
            let c = component[arc.source];
            if c == component[arc.target] {
                let group = &mut groups[c];
                group.arcs.push(WeightedArc::new(
                    local_id[arc.source],
                    local_id[arc.target],
                    arc.weight,
                ));
                group.core_index.push(index);
            }
        }

        let mut best: Option<PolicyCycle> = None;
        let mut rounds = 0;
        for group in groups.iter().filter(|group| !group.arcs.is_empty()) {
            let (candidate, used) = group.minimum_mean_cycle();
            rounds += used;
            if best.as_ref().map_or(true, |b| candidate.is_better_than(b)) {
                best = Some(PolicyCycle {
                    total: candidate.total,
                    length: candidate.length,
                    arcs: candidate
                        .arcs
                        .iter()
                        .map(|&a| group.core_index[a])
                        .collect(),
                });
            }
        }
        log::debug!("[HowardSolver] {} policy rounds", rounds);

        let best = best.expect("a trimmed non-empty graph has a cycle");
        let mean = Rational64::new(best.total, best.length);
        let cycle = MeanCycle {
            arcs: best.arcs.iter().map(|&a| core.caller_index[a]).collect(),
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

/// A cycle with its unreduced total weight and arc count.
#[derive(Debug, Clone)]
struct PolicyCycle {
    total: i64,
    length: i64,
    arcs: Vec<usize>,
}

impl PolicyCycle {
    fn is_better_than(&self, other: &PolicyCycle) -> bool {
        compare_ratios((self.total, self.length), (other.total, other.length)) == Ordering::Less
    }
}

/// One strongly connected component, renumbered from zero.
#[derive(Debug, Default)]
struct Component {
    nodes: usize,
    arcs: Vec<WeightedArc>,
    /// Index of each component arc in the trimmed core.
    core_index: Vec<usize>,
}

impl Component {
    /// The least-mean cycle of the component, as component arc indices,
    /// and the number of policy rounds used.
    fn minimum_mean_cycle(&self) -> (PolicyCycle, usize) {
        let n = self.nodes;
        let mut incoming = vec![Vec::new(); n];
        let mut policy = vec![usize::MAX; n];
        for (index, arc) in self.arcs.iter().enumerate() {
            incoming[arc.target].push(index);
            let current = policy[arc.source];
            if current == usize::MAX || arc.weight < self.arcs[current].weight {
                policy[arc.source] = index;
            }
        }

        let mut distance = vec![0i64; n];
        let mut reached = vec![false; n];
        let mut queue: Vec<usize> = Vec::with_capacity(n);
        let mut best: Option<PolicyCycle> = None;
        let mut rounds = 0;

        loop {
            rounds += 1;
            let current = self.policy_cycle(&policy);
            let (cost, size) = (current.total, current.length);
            let root = self.arcs[current.arcs[0]].source;
            if best.as_ref().map_or(true, |b| current.is_better_than(b)) {
                best = Some(current);
            }
            let reduced = |arc: &WeightedArc| arc.weight * size - cost;

            reached.fill(false);
            queue.clear();
            queue.push(root);
            reached[root] = true;
            distance[root] = 0;
            let mut front = 0;
            while front < queue.len() {
                let v = queue[front];
                front += 1;
                for &index in &incoming[v] {
                    let u = self.arcs[index].source;
                    if policy[u] == index && !reached[u] {
                        reached[u] = true;
                        distance[u] = distance[v] + reduced(&self.arcs[index]);
                        queue.push(u);
                    }
                }
            }
            front = 0;
            while queue.len() < n {
                let v = queue[front];
                front += 1;
                for &index in &incoming[v] {
                    let u = self.arcs[index].source;
                    if !reached[u] {
                        reached[u] = true;
                        policy[u] = index;
                        distance[u] = distance[v] + reduced(&self.arcs[index]);
                        queue.push(u);
                    }
                }
            }

            let mut improved = false;
            for (index, arc) in self.arcs.iter().enumerate() {
                let candidate = distance[arc.target] + reduced(arc);
                if candidate < distance[arc.source] {
                    distance[arc.source] = candidate;
                    policy[arc.source] = index;
                    improved = true;
                }
            }
            if !improved {
                break;
            }
        }
        (best.expect("the loop body runs at least once"), rounds)
    }

    /// The least-mean cycle of the policy graph.
    fn policy_cycle(&self, policy: &[usize]) -> PolicyCycle {
        const UNSEEN: usize = usize::MAX;
        let mut walk = vec![UNSEEN; self.nodes];
        let mut best: Option<PolicyCycle> = None;
        for start in 0..self.nodes {
            if walk[start] != UNSEEN {
                continue;
            }
            let mut v = start;
            while walk[v] == UNSEEN {
                walk[v] = start;
                v = self.arcs[policy[v]].target;
            }
            if walk[v] != start {
                continue;
            }

            let (mut total, mut length) = (0i64, 0i64);
            let mut u = v;
            loop {
                let arc = &self.arcs[policy[u]];
                total += arc.weight;
                length += 1;
                u = arc.target;
                if u == v {
                    break;
                }
            }
            let better = best.as_ref().map_or(true, |b| {
                compare_ratios((total, length), (b.total, b.length)) == Ordering::Less
            });
            if better {
                let mut arcs = Vec::with_capacity(length as usize);
                let mut u = v;
                loop {
                    arcs.push(policy[u]);
                    u = self.arcs[policy[u]].target;
                    if u == v {
                        break;
                    }
                }
                best = Some(PolicyCycle {
                    total,
                    length,
                    arcs,
                });
            }
        }
        best.expect("every vertex has a policy arc, so the policy graph has a cycle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmc::KarpSolver;

    fn arcs(list: &[(usize, usize, i64)]) -> Vec<WeightedArc> {
        list.iter().map(|&(s, t, w)| WeightedArc::new(s, t, w)).collect()
    }

    fn assert_agrees_with_karp(node_count: usize, g: &[WeightedArc]) {
        let howard = HowardSolver.solve(node_count, g);
        let karp = KarpSolver.solve(node_count, g);
        assert_eq!(howard.as_ref().map(|c| c.mean), karp.map(|c| c.mean));
        if let Some(cycle) = howard {
            assert!(cycle.is_closed_walk(g));
            assert_eq!(
                Rational64::new(cycle.total_weight(g), cycle.len() as i64),
                cycle.mean
            );
        }
    }

    #[test]
    fn test_acyclic_graph_has_no_cycle() {
        let g = arcs(&[(0, 1, 1), (1, 2, 1), (0, 2, 5)]);
        assert!(HowardSolver.solve(3, &g).is_none());
        assert!(HowardSolver.solve(2, &[]).is_none());
    }

    #[test]
    fn test_self_loop() {
        let g = arcs(&[(0, 1, 1), (1, 1, 3)]);
        let cycle = HowardSolver.solve(2, &g).unwrap();
        assert_eq!(cycle.arcs, vec![1]);
        assert_eq!(cycle.mean, Rational64::from_integer(3));
    }

    #[test]
    fn test_lightest_first_arc_is_not_optimal() {
        // The initial policy follows 0 → 1 (weight 0) into the 1-2 cycle of
        // mean 5, but 0 → 3 → 0 has mean 1.
        let g = arcs(&[(0, 1, 0), (1, 2, 5), (2, 1, 5), (2, 0, 5), (0, 3, 1), (3, 0, 1)]);
        let cycle = HowardSolver.solve(4, &g).unwrap();
        assert_eq!(cycle.mean, Rational64::from_integer(1));
        assert_eq!(cycle.len(), 2);
        assert_agrees_with_karp(4, &g);
    }

    #[test]
    fn test_best_component_wins() {
        // Two components joined by 1 → 2; the second has the lower mean.
        let g = arcs(&[(0, 1, 4), (1, 0, 4), (1, 2, 0), (2, 3, 1), (3, 2, 2)]);
        let cycle = HowardSolver.solve(4, &g).unwrap();
        assert_eq!(cycle.mean, Rational64::new(3, 2));
        assert_agrees_with_karp(4, &g);
    }

    #[test]
    fn test_negative_weights() {
        let g = arcs(&[(0, 1, -4), (1, 0, 1), (1, 2, 0), (2, 2, -1)]);
        let cycle = HowardSolver.solve(3, &g).unwrap();
        assert_eq!(cycle.mean, Rational64::new(-3, 2));
        assert_agrees_with_karp(3, &g);
    }

    #[test]
    fn test_dense_component_agrees_with_karp() {
        // Complete digraph on six vertices with self-loops and mixed weights.
        let mut g = Vec::new();
        for s in 0..6usize {
            for t in 0..6usize {
                g.push(WeightedArc::new(s, t, ((s * 7 + t * 3) % 5) as i64 - 1));
            }
        }
        assert_agrees_with_karp(6, &g);
    }
}
