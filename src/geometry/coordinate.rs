// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Row/column coordinates of patch vertices.

use std::fmt;

/// Position of a vertex inside a patch: `row` in `0..rows`, `column` in `0..width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Whether the vertical edge below this vertex (towards row + 1) exists.
    ///
    /// Row 0 links its even columns upward, row 1 its odd columns, and so on,
    /// which produces the brick layout of the hexagonal grid.
    pub const fn links_up(self) -> bool {
        self.column % 2 == self.row % 2
    }
}

impl fmt::Display for GridCoordinate {
    /// Format as the artifact's `(column,row)` pair with 1-based rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_up_alternates_by_row() {
        assert!(GridCoordinate::new(0, 0).links_up());
        assert!(!GridCoordinate::new(0, 1).links_up());
        assert!(!GridCoordinate::new(1, 0).links_up());
        assert!(GridCoordinate::new(1, 1).links_up());
        assert!(GridCoordinate::new(2, 2).links_up());
    }

    #[test]
    fn test_display_is_column_then_one_based_row() {
        assert_eq!(GridCoordinate::new(0, 3).to_string(), "(3,1)");
        assert_eq!(GridCoordinate::new(2, 0).to_string(), "(0,3)");
    }
}
