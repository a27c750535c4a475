// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The configuration graph.
//!
//! One vertex per valid bar, in enumeration order, and an arc `u → v`
//! whenever bar `v` may follow bar `u`. The arc weight is the number of
//! members `v` contributes in its two new columns.
//!
//! Arcs are stored grouped by source (`offsets[u]..offsets[u + 1]` indexes
//! the arcs leaving `u`), sorted by target within each group.

use crate::bars::Bar;
use crate::context::CancelToken;
use crate::error::{Result, SearchError};
use crate::geometry::constants::{BAR_WIDTH, MERGED_WIDTH, OVERLAP};
use crate::geometry::Patch;
use crate::graph::overlap::{Concatenation, OverlapChecker};
use crate::mmc::WeightedArc;
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigArc {
    pub source: usize,
    pub target: usize,
    pub weight: usize,
}

#[derive(Debug, Clone)]
pub struct ConfigGraph {
    rows: usize,
    bars: Vec<Bar>,
    arcs: Vec<ConfigArc>,
    offsets: Vec<usize>,
    overlapping_pairs: usize,
}

/// Overlap columns of a bar packed into an integer, two bits per row.
fn overlap_key(bar: &Bar, first_column: usize) -> u64 {
    let mut key = 0u64;
    for row in 0..bar.rows() {
        for offset in 0..OVERLAP {
            key = (key << 1) | u64::from(bar.cell(row, first_column + offset));
        }
    }
    key
}

/// Bars grouped by their leading overlap columns, each group in ascending
/// bar order. The successors of `u` that can overlap it are exactly the
/// group keyed by `u`'s trailing overlap columns.
struct SuccessorIndex {
    groups: HashMap<u64, Vec<usize>>,
}

impl SuccessorIndex {
    fn new(bars: &[Bar]) -> Self {
        let mut groups: HashMap<u64, Vec<usize>> = HashMap::new();
        for (index, bar) in bars.iter().enumerate() {
            groups.entry(overlap_key(bar, 0)).or_default().push(index);
        }
        Self { groups }
    }

    fn candidates(&self, source: &Bar) -> &[usize] {
        self.groups
            .get(&overlap_key(source, BAR_WIDTH - OVERLAP))
            .map_or(&[][..], Vec::as_slice)
    }
}

impl ConfigGraph {
    /// Build the graph over `bars`, testing every ordered pair (including a
    /// bar followed by itself) on the merged-width patch.
    ///
    /// Sources are processed in parallel, one [`OverlapChecker`] per worker.
    /// Per-source buffers and the final arc table are allocated fallibly.
    ///
    /// # Panics
    ///
    /// Panics if `merged_patch` is not [`MERGED_WIDTH`] columns wide or if a
    /// bar has a different row count.
    pub fn build(merged_patch: &Patch, bars: Vec<Bar>, cancel: &CancelToken) -> Result<Self> {
        assert_eq!(merged_patch.width(), MERGED_WIDTH);
        let rows = merged_patch.rows();
        assert!(
            bars.iter().all(|bar| bar.rows() == rows),
            "every bar must have {} rows",
            rows
        );

        let index = SuccessorIndex::new(&bars);
        let per_source: Vec<(Vec<ConfigArc>, usize)> = (0..bars.len())
            .into_par_iter()
            .map_init(
                || OverlapChecker::new(merged_patch),
                |checker, source| {
                    if cancel.is_cancelled() {
                        return Err(SearchError::Cancelled {
                            phase: "configuration graph build",
                        });
                    }
                    let v1 = &bars[source];
                    let candidates = index.candidates(v1);
                    let mut local = Vec::new();
                    for &target in candidates {
                        match checker.check(v1, &bars[target]) {
                            Concatenation::Accepted { weight } => {
                                SearchError::reserve(&mut local, 1, "arc buffer")?;
                                local.push(ConfigArc {
                                    source,
                                    target,
                                    weight,
                                });
                            }
                            Concatenation::InvalidMerge(_) => {}
                            Concatenation::OverlapMismatch => {
                                panic!("successor index grouped bar {} under bar {}", target, source)
                            }
                        }
                    }
                    Ok((local, candidates.len()))
                },
            )
            .collect::<Result<_>>()?;

        let arc_count: usize = per_source.iter().map(|(local, _)| local.len()).sum();
        let overlapping_pairs = per_source.iter().map(|&(_, pairs)| pairs).sum();

        let mut arcs = Vec::new();
        arcs.try_reserve_exact(arc_count)
            .map_err(|_| SearchError::AllocationFailed {
                what: "configuration graph arcs",
                count: arc_count,
            })?;
        let mut offsets = Vec::with_capacity(bars.len() + 1);
        offsets.push(0);
        for (local, _) in per_source {
            arcs.extend(local);
            offsets.push(arcs.len());
        }

        Ok(Self {
            rows,
            bars,
            arcs,
            offsets,
            overlapping_pairs,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn node_count(&self) -> usize {
        self.bars.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar(&self, node: usize) -> &Bar {
        &self.bars[node]
    }

    /// All arcs, grouped by source in ascending order.
    pub fn arcs(&self) -> &[ConfigArc] {
        &self.arcs
    }

    pub fn arcs_from(&self, source: usize) -> &[ConfigArc] {
        &self.arcs[self.offsets[source]..self.offsets[source + 1]]
    }

    /// Ordered pairs whose overlap columns agree, accepted or not.
    pub fn overlapping_pairs(&self) -> usize {
        self.overlapping_pairs
    }

    pub fn self_loops(&self) -> impl Iterator<Item = &ConfigArc> + '_ {
        self.arcs.iter().filter(|arc| arc.source == arc.target)
    }

    /// The arcs in the form consumed by a [`crate::mmc::MeanCycleSolver`];
    /// arc indices are preserved.
    pub fn solver_arcs(&self) -> Vec<WeightedArc> {
        self.arcs
            .iter()
            .map(|arc| WeightedArc::new(arc.source, arc.target, arc.weight as i64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::enumerate_bars;
    use crate::graph::overlap::overlaps;

    fn graph(rows: usize) -> ConfigGraph {
        let cancel = CancelToken::new();
        let bars = enumerate_bars(&Patch::new(rows, BAR_WIDTH), 64, &cancel).unwrap();
        ConfigGraph::build(&Patch::new(rows, MERGED_WIDTH), bars, &cancel).unwrap()
    }

    #[test]
    fn test_single_row_self_loops() {
        let g = graph(1);
        let loops: Vec<(u64, usize)> = g
            .self_loops()
            .map(|arc| (g.bar(arc.source).counter(), arc.weight))
            .collect();
        assert_eq!(loops, vec![(0b0101, 1), (0b1010, 1), (0b1111, 2)]);
    }

    #[test]
    fn test_arcs_are_grouped_and_sorted() {
        let g = graph(2);
        assert_eq!(g.offsets.len(), g.node_count() + 1);
        for source in 0..g.node_count() {
            let out = g.arcs_from(source);
            assert!(out.iter().all(|arc| arc.source == source));
            assert!(out.windows(2).all(|w| w[0].target < w[1].target));
        }
    }

    #[test]
    fn test_index_matches_all_pairs() {
        let g = graph(2);
        let patch = Patch::new(2, MERGED_WIDTH);
        let mut checker = OverlapChecker::new(&patch);
        let mut expected = Vec::new();
        let mut overlapping = 0;
        for (source, v1) in g.bars().iter().enumerate() {
            for (target, v2) in g.bars().iter().enumerate() {
                if overlaps(v1, v2) {
                    overlapping += 1;
                }
                if let Concatenation::Accepted { weight } = checker.check(v1, v2) {
                    expected.push(ConfigArc {
                        source,
                        target,
                        weight,
                    });
                }
            }
        }
        assert_eq!(g.arcs(), expected.as_slice());
        assert_eq!(g.overlapping_pairs(), overlapping);
    }

    #[test]
    fn test_solver_arcs_preserve_order() {
        let g = graph(1);
        let solver_arcs = g.solver_arcs();
        assert_eq!(solver_arcs.len(), g.arc_count());
        for (arc, weighted) in g.arcs().iter().zip(&solver_arcs) {
            assert_eq!(weighted.source, arc.source);
            assert_eq!(weighted.target, arc.target);
            assert_eq!(weighted.weight, arc.weight as i64);
        }
    }

    #[test]
    fn test_cancelled_build_fails() {
        let cancel = CancelToken::new();
        let bars = enumerate_bars(&Patch::new(1, BAR_WIDTH), 16, &cancel).unwrap();
        cancel.cancel();
        let result = ConfigGraph::build(&Patch::new(1, MERGED_WIDTH), bars, &cancel);
        assert!(matches!(result, Err(SearchError::Cancelled { .. })));
    }

    #[test]
    fn test_empty_bar_list() {
        let g = ConfigGraph::build(&Patch::new(1, MERGED_WIDTH), Vec::new(), &CancelToken::new())
            .unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.arc_count(), 0);
    }
}
