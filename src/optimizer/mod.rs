// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Density optimizer.
//!
//! A cycle `u_0 → u_1 → ... → u_{m-1} → u_0` in the configuration graph is
//! a periodic strip: consecutive bars overlap on two columns, so each arc
//! advances the strip by two columns. Arc `h` contributes the members of its
//! source bar's new columns at pattern columns `2h` and `2h + 1`; the period
//! is `2m` columns and holds exactly the cycle's total weight in members.
//! The minimum mean cycle is therefore the minimum density:
//!
//! ```text
//! density = total weight / (rows · 2m) = mean / (2 · rows)
//! ```

pub mod pattern_file;
pub mod verify;

pub use pattern_file::PatternFile;
pub use verify::{verify_pattern, Verification};

use crate::error::{Result, SearchError};
use crate::geometry::constants::NEW_COLUMNS;
use crate::geometry::GridCoordinate;
use crate::graph::ConfigGraph;
use crate::mmc::MeanCycleSolver;
use num_rational::Rational64;
use num_traits::ToPrimitive;

/// One period of a minimum-density code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub rows: usize,
    pub columns: usize,
    /// Mean arc weight of the cycle: members per two columns.
    pub cycle_mean: Rational64,
    /// Members per vertex.
    pub density: Rational64,
    pub total_weight: usize,
    /// Source bar of each cycle arc, in cycle order.
    pub bars: Vec<usize>,
    /// Member cells of the period, in cycle order.
    pub cells: Vec<GridCoordinate>,
}

impl Pattern {
    /// The artifact form of this pattern.
    pub fn to_pattern_file(&self) -> PatternFile {
        PatternFile {
            rows: self.rows,
            columns: self.columns,
            // A Rational64 always has a finite f64 approximation.
            cycle_mean: self.cycle_mean.to_f64().unwrap_or(f64::NAN),
            cells: self.cells.clone(),
        }
    }
}

/// Find the minimum-density periodic code described by `graph`.
///
/// Fails with [`SearchError::NoCycle`] when the graph is acyclic.
pub fn optimize<S>(graph: &ConfigGraph, solver: &S) -> Result<Pattern>
where
    S: MeanCycleSolver + ?Sized,
{
    let arcs = graph.solver_arcs();
    let cycle = solver
        .solve(graph.node_count(), &arcs)
        .ok_or(SearchError::NoCycle {
            nodes: graph.node_count(),
            arcs: graph.arc_count(),
        })?;
    assert!(
        cycle.is_closed_walk(&arcs),
        "mean cycle solver returned an open walk"
    );

    let rows = graph.rows();
    let columns = NEW_COLUMNS * cycle.len();
    let mut bars = Vec::with_capacity(cycle.len());
    let mut cells = Vec::new();
    for (h, &arc) in cycle.arcs.iter().enumerate() {
        let source = graph.arcs()[arc].source;
        bars.push(source);
        cells.extend(
            graph
                .bar(source)
                .new_column_members()
                .map(|cell| GridCoordinate::new(cell.row, NEW_COLUMNS * h + cell.column)),
        );
    }

    let total_weight = cycle.arcs.iter().map(|&a| graph.arcs()[a].weight).sum::<usize>();
    assert_eq!(
        cells.len(),
        total_weight,
        "period members disagree with the cycle weight"
    );
    let density = Rational64::new(total_weight as i64, (rows * columns) as i64);
    debug_assert_eq!(
        density,
        cycle.mean / Rational64::from_integer((NEW_COLUMNS * rows) as i64)
    );

    Ok(Pattern {
        rows,
        columns,
        cycle_mean: cycle.mean,
        density,
        total_weight,
        bars,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::enumerate_bars;
    use crate::context::CancelToken;
    use crate::geometry::constants::{BAR_WIDTH, MERGED_WIDTH};
    use crate::geometry::Patch;
    use crate::mmc::{KarpSolver, MeanCycle, WeightedArc};

    fn graph(rows: usize) -> ConfigGraph {
        let cancel = CancelToken::new();
        let bars = enumerate_bars(&Patch::new(rows, BAR_WIDTH), 64, &cancel).unwrap();
        ConfigGraph::build(&Patch::new(rows, MERGED_WIDTH), bars, &cancel).unwrap()
    }

    #[test]
    fn test_single_row_density() {
        let pattern = optimize(&graph(1), &KarpSolver).unwrap();
        assert_eq!(pattern.cycle_mean, Rational64::from_integer(1));
        assert_eq!(pattern.density, Rational64::new(1, 2));
        assert_eq!(pattern.columns, 2 * pattern.bars.len());
        assert_eq!(pattern.cells.len(), pattern.total_weight);
    }

    #[test]
    fn test_cells_lie_in_the_period() {
        let pattern = optimize(&graph(2), &KarpSolver).unwrap();
        for cell in &pattern.cells {
            assert!(cell.row < pattern.rows);
            assert!(cell.column < pattern.columns);
        }
    }

    struct NoCycleSolver;

    impl MeanCycleSolver for NoCycleSolver {
        fn solve(&self, _: usize, _: &[WeightedArc]) -> Option<MeanCycle> {
            None
        }
    }

    #[test]
    fn test_no_cycle_is_an_error() {
        let result = optimize(&graph(1), &NoCycleSolver);
        assert!(matches!(result, Err(SearchError::NoCycle { .. })));
    }

    #[test]
    fn test_pattern_file_form() {
        let pattern = optimize(&graph(1), &KarpSolver).unwrap();
        let file = pattern.to_pattern_file();
        assert_eq!(file.rows, 1);
        assert_eq!(file.columns, pattern.columns);
        assert_eq!(file.cycle_mean, 1.0);
        assert_eq!(file.cells, pattern.cells);
    }

    #[test]
    fn test_fractional_mean_in_pattern_file() {
        let pattern = Pattern {
            rows: 2,
            columns: 4,
            cycle_mean: Rational64::new(3, 2),
            density: Rational64::new(3, 8),
            total_weight: 3,
            bars: vec![0, 1],
            cells: vec![
                GridCoordinate::new(0, 0),
                GridCoordinate::new(1, 1),
                GridCoordinate::new(0, 3),
            ],
        };
        assert_eq!(pattern.to_pattern_file().cycle_mean, 1.5);

        let third = Pattern {
            cycle_mean: Rational64::new(-7, 3),
            ..pattern
        };
        assert!((third.to_pattern_file().cycle_mean + 7.0 / 3.0).abs() < 1e-12);
    }
}
