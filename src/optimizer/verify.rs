// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Independent check of a pattern artifact.
//!
//! A pattern of `P` columns describes the infinite strip obtained by
//! repeating it horizontally. Two vertices can only share an identifier if
//! they are at distance at most 2, hence at most two columns apart, so it
//! suffices to check one unrolled window:
//!
//! ```text
//! patch column:    0 1 2 3 | 4 ... P+3 | P+4 ... P+7
//! pattern column:  P-4 ... | 0 ... P-1 | 0 ... 3
//! ```
//!
//! Identifiers are exact on every column but the first and last, and that
//! interior covers the period plus three columns on each side.

use crate::bars::MembershipAssignment;
use crate::error::{Result, SearchError};
use crate::geometry::{GridCoordinate, Patch};
use crate::identify::{interior_columns, CodeViolation, IdentifierEngine};
use crate::optimizer::PatternFile;
use num_rational::Rational64;
use std::collections::HashSet;

/// Columns added on each side of the period.
const MARGIN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub rows: usize,
    pub columns: usize,
    /// Distinct member cells in one period.
    pub members: usize,
    pub density: Rational64,
    /// First violation found, in pattern coordinates.
    pub violation: Option<CodeViolation>,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Check that the periodic extension of `pattern` is an identifying code.
///
/// Fails with [`SearchError::InvalidPattern`] when the pattern cannot tile
/// the strip: no rows, or a column count that is zero or odd (the vertical
/// edges alternate with column parity).
pub fn verify_pattern(pattern: &PatternFile) -> Result<Verification> {
    let rows = pattern.rows;
    let columns = pattern.columns;
    if rows == 0 {
        return Err(SearchError::InvalidPattern {
            reason: "pattern has no rows".to_owned(),
        });
    }
    if columns == 0 || columns % 2 != 0 {
        return Err(SearchError::InvalidPattern {
            reason: format!("period of {} columns is not a positive even number", columns),
        });
    }
    if let Some(cell) = pattern
        .cells
        .iter()
        .find(|cell| cell.row >= rows || cell.column >= columns)
    {
        return Err(SearchError::InvalidPattern {
            reason: format!("cell {} lies outside the period", cell),
        });
    }

    let members: HashSet<GridCoordinate> = pattern.cells.iter().copied().collect();
    let width = columns + 2 * MARGIN;
    let patch = Patch::new(rows, width);
    let to_pattern = |cell: GridCoordinate| {
        let column = (cell.column as isize - MARGIN as isize).rem_euclid(columns as isize);
        GridCoordinate::new(cell.row, column as usize)
    };

    let mut assignment = MembershipAssignment::zeros(patch.len());
    for node in patch.nodes() {
        if members.contains(&to_pattern(patch.coordinate(node))) {
            assignment.set(node, true);
        }
    }

    let mut engine = IdentifierEngine::new(&patch, interior_columns(width));
    let violation = engine
        .check(&assignment)
        .err()
        .map(|violation| violation.map_coordinates(to_pattern));
    if let Some(violation) = &violation {
        log::debug!("[Verifier] {}", violation);
    }

    Ok(Verification {
        rows,
        columns,
        members: members.len(),
        density: Rational64::new(members.len() as i64, (rows * columns) as i64),
        violation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(rows: usize, columns: usize, cells: &[(usize, usize)]) -> PatternFile {
        PatternFile {
            rows,
            columns,
            cycle_mean: 0.0,
            cells: cells
                .iter()
                .map(|&(row, column)| GridCoordinate::new(row, column))
                .collect(),
        }
    }

    #[test]
    fn test_alternating_path_code() {
        let result = verify_pattern(&pattern(1, 2, &[(0, 1)])).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.density, Rational64::new(1, 2));
    }

    #[test]
    fn test_every_vertex_in_the_code_is_valid_on_a_path() {
        let result = verify_pattern(&pattern(1, 2, &[(0, 0), (0, 1)])).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.members, 2);
        assert_eq!(result.density, Rational64::from_integer(1));
    }

    #[test]
    fn test_empty_code_reports_empty_identifier() {
        let result = verify_pattern(&pattern(2, 4, &[])).unwrap();
        assert!(matches!(
            result.violation,
            Some(CodeViolation::EmptyIdentifier { .. })
        ));
    }

    #[test]
    fn test_shared_identifier_maps_into_the_period() {
        // Period 0110 on a path: vertices 1 and 2 both see {1,2}.
        let result = verify_pattern(&pattern(1, 4, &[(0, 1), (0, 2)])).unwrap();
        match result.violation {
            Some(CodeViolation::SharedIdentifier { first, second, .. }) => {
                assert!(first.column < 4 && second.column < 4);
            }
            other => panic!("unexpected verification result {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_cells_count_once() {
        let result = verify_pattern(&pattern(1, 2, &[(0, 1), (0, 1)])).unwrap();
        assert_eq!(result.members, 1);
    }

    #[test]
    fn test_odd_period_is_rejected() {
        assert!(matches!(
            verify_pattern(&pattern(2, 3, &[])),
            Err(SearchError::InvalidPattern { .. })
        ));
        assert!(matches!(
            verify_pattern(&pattern(0, 2, &[])),
            Err(SearchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_cell_outside_period_is_rejected() {
        assert!(matches!(
            verify_pattern(&pattern(1, 2, &[(0, 2)])),
            Err(SearchError::InvalidPattern { .. })
        ));
    }
}
