// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bars: accepted membership assignments over a width-4 patch.
//!
//! Cells are stored row by row, as in the patch:
//!
//! ```text
//! row 1: 4--5--6--7
//!        |     |
//! row 0: 0--1--2--3
//! ```
//!
//! The weight of a bar counts only its members in the last
//! [`NEW_COLUMNS`] columns, the ones a bar adds when it follows another
//! bar in a configuration-graph cycle.

use crate::bars::MembershipAssignment;
use crate::geometry::constants::{BAR_WIDTH, NEW_COLUMNS, OVERLAP};
use crate::geometry::GridCoordinate;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bar {
    rows: usize,
    assignment: MembershipAssignment,
    members: usize,
    weight: usize,
}

impl Bar {
    /// Wrap an assignment over a `rows × BAR_WIDTH` patch.
    ///
    /// # Panics
    ///
    /// Panics if the assignment does not cover exactly `rows * BAR_WIDTH` cells.
    pub fn new(rows: usize, assignment: MembershipAssignment) -> Self {
        assert_eq!(
            assignment.len(),
            rows * BAR_WIDTH,
            "a bar over {} rows needs {} cells",
            rows,
            rows * BAR_WIDTH
        );
        let members = assignment.members();
        let weight = (0..rows)
            .flat_map(|row| (OVERLAP..BAR_WIDTH).map(move |column| (row, column)))
            .filter(|&(row, column)| assignment.is_member(row * BAR_WIDTH + column))
            .count();
        Self {
            rows,
            assignment,
            members,
            weight,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn assignment(&self) -> &MembershipAssignment {
        &self.assignment
    }

    /// Enumeration counter value of this bar.
    pub fn counter(&self) -> u64 {
        self.assignment.counter()
    }

    /// Members in the whole bar.
    pub fn members(&self) -> usize {
        self.members
    }

    /// Members in the non-overlapping (new) columns.
    pub fn weight(&self) -> usize {
        self.weight
    }

    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> bool {
        debug_assert!(row < self.rows && column < BAR_WIDTH);
        self.assignment.is_member(row * BAR_WIDTH + column)
    }

    /// Member cells of the new columns, row by row, with columns renumbered
    /// from 0 to `NEW_COLUMNS - 1`.
    pub fn new_column_members(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..NEW_COLUMNS)
                .filter(move |&offset| self.cell(row, OVERLAP + offset))
                .map(move |offset| GridCoordinate::new(row, offset))
        })
    }
}

impl fmt::Display for Bar {
    /// Format as `weight: w [r0/r1/...]` with each row as `0`/`1` digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weight: {} [", self.weight)?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, "/")?;
            }
            for column in 0..BAR_WIDTH {
                write!(f, "{}", if self.cell(row, column) { '1' } else { '0' })?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_counts_new_columns_only() {
        let bar = Bar::new(1, MembershipAssignment::from_counter(0b1101, 4));
        assert_eq!(bar.members(), 3);
        assert_eq!(bar.weight(), 1);
        assert_eq!(bar.counter(), 0b1101);
    }

    #[test]
    fn test_two_row_cells() {
        // Row 0 = 0011, row 1 = 1000.
        let bar = Bar::new(2, MembershipAssignment::from_counter(0b0011_1000, 8));
        assert!(bar.cell(0, 2));
        assert!(bar.cell(0, 3));
        assert!(bar.cell(1, 0));
        assert!(!bar.cell(1, 3));
        assert_eq!(bar.weight(), 2);
        assert_eq!(bar.to_string(), "weight: 2 [0011/1000]");
    }

    #[test]
    fn test_new_column_members_are_renumbered() {
        let bar = Bar::new(2, MembershipAssignment::from_counter(0b0001_0010, 8));
        let cells: Vec<_> = bar.new_column_members().collect();
        assert_eq!(
            cells,
            vec![GridCoordinate::new(0, 1), GridCoordinate::new(1, 0)]
        );
    }

    #[test]
    #[should_panic(expected = "needs 8 cells")]
    fn test_wrong_size_is_rejected() {
        let _ = Bar::new(2, MembershipAssignment::zeros(6));
    }
}
