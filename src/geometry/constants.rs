// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for bars of the hexagonal grid H_k.
//!
//! A bar is a vertical strip of `BAR_WIDTH` columns spanning all k rows.
//! Consecutive bars in a configuration-graph cycle share `OVERLAP`
//! columns, so every arc introduces `NEW_COLUMNS` columns to the pattern.
//!
//! The widths are tied to the hexagonal grid: a closed neighborhood spans
//! at most one column on either side, so a width-4 bar has two interior
//! columns and two bars overlapping on two columns cover every pair of
//! nodes at distance two inside one merged window.

/// Maximum number of vertices in a closed neighborhood of H_k
/// (the vertex itself plus at most three neighbors).
pub const NEIGHBORHOOD_SIZE: usize = 4;

/// Maximum degree of a vertex of H_k.
pub const MAX_DEGREE: usize = NEIGHBORHOOD_SIZE - 1;

/// Number of columns in a bar.
pub const BAR_WIDTH: usize = 4;

/// Number of columns two concatenated bars share.
pub const OVERLAP: usize = 2;

/// Number of columns a bar contributes beyond its overlap with its predecessor.
pub const NEW_COLUMNS: usize = BAR_WIDTH - OVERLAP;

/// Width of the bar obtained by merging two overlapping bars.
pub const MERGED_WIDTH: usize = 2 * BAR_WIDTH - OVERLAP;

/// Largest supported row count.
///
/// The enumeration counter has `BAR_WIDTH * rows` bits and must fit in a
/// `u64` with room for the exclusive upper bound `1 << bits`.
pub const MAX_ROWS: usize = 15;

const _: () = assert!(BAR_WIDTH * MAX_ROWS < u64::BITS as usize);
const _: () = assert!(OVERLAP < BAR_WIDTH);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_widths() {
        assert_eq!(NEW_COLUMNS, 2);
        assert_eq!(MERGED_WIDTH, 6);
        assert_eq!(MAX_DEGREE, 3);
    }
}
