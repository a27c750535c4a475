// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The part of a solver's input that can carry a cycle.

use crate::mmc::WeightedArc;
use std::cmp::Ordering;

/// The subgraph left after repeatedly trimming vertices without incoming
/// or outgoing arcs, with vertices renumbered densely.
pub(super) struct CyclicCore {
    pub(super) nodes: usize,
    pub(super) arcs: Vec<WeightedArc>,
    /// Index of each local arc in the caller's arc list.
    pub(super) caller_index: Vec<usize>,
}

impl CyclicCore {
    pub(super) fn new(node_count: usize, arcs: &[WeightedArc]) -> Self {
        let mut in_degree = vec![0usize; node_count];
        let mut out_degree = vec![0usize; node_count];
        let mut incoming = vec![Vec::new(); node_count];
        let mut outgoing = vec![Vec::new(); node_count];
        for (index, arc) in arcs.iter().enumerate() {
            out_degree[arc.source] += 1;
            in_degree[arc.target] += 1;
            outgoing[arc.source].push(index);
            incoming[arc.target].push(index);
        }

        let mut alive = vec![true; node_count];
        let mut queue: Vec<usize> = (0..node_count)
            .filter(|&v| in_degree[v] == 0 || out_degree[v] == 0)
            .collect();
        for &v in &queue {
            alive[v] = false;
        }
        while let Some(v) = queue.pop() {
            for &index in &outgoing[v] {
                let target = arcs[index].target;
                if alive[target] {
                    in_degree[target] -= 1;
                    if in_degree[target] == 0 {
                        alive[target] = false;
                        queue.push(target);
                    }
                }
            }
            for &index in &incoming[v] {
                let source = arcs[index].source;
                if alive[source] {
                    out_degree[source] -= 1;
                    if out_degree[source] == 0 {
                        alive[source] = false;
                        queue.push(source);
                    }
                }
            }
        }

        let mut local_id = vec![usize::MAX; node_count];
        let mut nodes = 0;
        for v in 0..node_count {
            if alive[v] {
                local_id[v] = nodes;
                nodes += 1;
            }
        }

        let mut local_arcs = Vec::new();
        let mut caller_index = Vec::new();
        for (index, arc) in arcs.iter().enumerate() {
            if alive[arc.source] && alive[arc.target] {
                local_arcs.push(WeightedArc::new(
                    local_id[arc.source],
                    local_id[arc.target],
                    arc.weight,
                ));
                caller_index.push(index);
            }
        }

        Self {
            nodes,
            arcs: local_arcs,
            caller_index,
        }
    }

    /// Strongly connected components (Tarjan, with an explicit stack).
    ///
    /// Returns the number of components and the component of each vertex.
    pub(super) fn strongly_connected_components(&self) -> (usize, Vec<usize>) {
        const UNVISITED: usize = usize::MAX;
        let n = self.nodes;
        let mut outgoing = vec![Vec::new(); n];
        for arc in &self.arcs {
            outgoing[arc.source].push(arc.target);
        }

        let mut order = vec![UNVISITED; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        let mut component = vec![UNVISITED; n];
        let mut count = 0;
        let mut next = 0;

        for root in 0..n {
            if order[root] != UNVISITED {
                continue;
            }
            order[root] = next;
            lowlink[root] = next;
            next += 1;
            stack.push(root);
            on_stack[root] = true;
            let mut calls: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(frame) = calls.last_mut() {
                let v = frame.0;
                if frame.1 < outgoing[v].len() {
                    let w = outgoing[v][frame.1];
                    frame.1 += 1;
                    if order[w] == UNVISITED {
                        order[w] = next;
                        lowlink[w] = next;
                        next += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        calls.push((w, 0));
                    } else if on_stack[w] {
                        lowlink[v] = lowlink[v].min(order[w]);
                    }
                    continue;
                }

                calls.pop();
                if let Some(&(parent, _)) = calls.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }
                if lowlink[v] == order[v] {
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        component[w] = count;
                        if w == v {
                            break;
                        }
                    }
                    count += 1;
                }
            }
        }
        (count, component)
    }
}

/// Orders `a.0 / a.1` against `b.0 / b.1`; denominators are positive.
pub(super) fn compare_ratios(a: (i64, i64), b: (i64, i64)) -> Ordering {
    (i128::from(a.0) * i128::from(b.1)).cmp(&(i128::from(b.0) * i128::from(a.1)))
}
