// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context and the phases of a search.
//!
//! A [`SearchContext`] owns everything one search needs:
//! - the validated [`SearchConfig`]
//! - [`MemoizedData`]: the read-only patches shared by all worker threads
//! - [`Statistics`], filled in as each phase completes
//! - a [`CancelToken`] checked by the parallel phases
//!
//! The phases run in order; each consumes the output of the previous one:
//!
//! ```text
//! enumerate_bars → build_graph → optimize → artifact
//! ```

pub mod cancel;
pub mod memoized;

pub use cancel::CancelToken;
pub use memoized::MemoizedData;

use crate::bars::{self, Bar};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::graph::ConfigGraph;
use crate::mmc::MeanCycleSolver;
use crate::optimizer::{self, Pattern, PatternFile};
use crate::statistics::{Counters, Statistics};
use std::time::{Duration, Instant};

/// Wall-clock time spent in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimings {
    pub enumeration: Duration,
    pub graph: Duration,
    pub solve: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.enumeration + self.graph + self.solve
    }
}

/// Everything a completed search produced.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub pattern: Pattern,
    pub artifact: PatternFile,
    pub graph_nodes: usize,
    pub graph_arcs: usize,
    pub timings: PhaseTimings,
}

#[derive(Debug)]
pub struct SearchContext {
    pub config: SearchConfig,
    pub memo: MemoizedData,
    pub statistics: Statistics,
    pub cancel: CancelToken,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        let memo = MemoizedData::new(config.rows);
        Self {
            config,
            memo,
            statistics: Statistics::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Replace the cancellation token, e.g. with one shared with a signal handler.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Phase 1: every valid bar, in ascending counter order.
    pub fn enumerate_bars(&mut self) -> Result<Vec<Bar>> {
        let patch = &self.memo.bar_patch;
        log::info!(
            "[BarEnumerator] Enumerating 2^{} assignments of {} rows",
            patch.len(),
            patch.rows()
        );
        let bars = bars::enumerate_bars(patch, self.config.chunk_size, &self.cancel)?;
        self.statistics.add(Counters::CandidateBars, 1u64 << patch.len());
        self.statistics.add(Counters::AcceptedBars, bars.len() as u64);
        log::info!("[BarEnumerator] {} valid bars", bars.len());
        Ok(bars)
    }

    /// Phase 2: the configuration graph over `bars`.
    pub fn build_graph(&mut self, bars: Vec<Bar>) -> Result<ConfigGraph> {
        let nodes = bars.len() as u64;
        let pair_space = nodes.saturating_mul(nodes);
        let graph = ConfigGraph::build(&self.memo.merged_patch, bars, &self.cancel)?;
        log::info!(
            "[ConfigGraph] Tested {} of {} ordered bar pairs (those with agreeing overlap columns)",
            graph.overlapping_pairs(),
            pair_space
        );
        self.statistics.add(Counters::PairSpace, pair_space);
        self.statistics
            .add(Counters::TestedPairs, graph.overlapping_pairs() as u64);
        self.statistics
            .add(Counters::AcceptedArcs, graph.arc_count() as u64);
        log::info!(
            "[ConfigGraph] {} vertices, {} arcs ({} self-loops)",
            graph.node_count(),
            graph.arc_count(),
            graph.self_loops().count()
        );
        Ok(graph)
    }

    /// Phase 3: the minimum-density pattern.
    pub fn optimize<S>(&mut self, graph: &ConfigGraph, solver: &S) -> Result<Pattern>
    where
        S: MeanCycleSolver + ?Sized,
    {
        log::info!("[Optimizer] Solving minimum mean cycle");
        let pattern = optimizer::optimize(graph, solver)?;
        self.statistics
            .add(Counters::CycleArcs, pattern.bars.len() as u64);
        log::info!(
            "[Optimizer] Cycle of {} arcs, mean {}, density {}",
            pattern.bars.len(),
            pattern.cycle_mean,
            pattern.density
        );
        log::debug!("[Optimizer] Bars on the cycle: {:?}", pattern.bars);
        Ok(pattern)
    }

    /// Run every phase and write the artifact to `config.output`.
    ///
    /// The artifact is only written once the solve has succeeded.
    pub fn run<S>(&mut self, solver: &S) -> Result<SearchOutcome>
    where
        S: MeanCycleSolver + ?Sized,
    {
        let mut timings = PhaseTimings::default();

        let start = Instant::now();
        let bars = self.enumerate_bars()?;
        timings.enumeration = start.elapsed();

        let start = Instant::now();
        let graph = self.build_graph(bars)?;
        timings.graph = start.elapsed();

        let start = Instant::now();
        let pattern = self.optimize(&graph, solver)?;
        timings.solve = start.elapsed();

        let artifact = pattern.to_pattern_file();
        artifact.write(&self.config.output)?;
        log::info!("[SearchContext] Wrote {}", self.config.output.display());

        Ok(SearchOutcome {
            pattern,
            artifact,
            graph_nodes: graph.node_count(),
            graph_arcs: graph.arc_count(),
            timings,
        })
    }
}
