// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Membership assignments and their binary-counter enumeration.
//!
//! An assignment stores one membership bit per patch vertex. During
//! enumeration it is read as a big-endian counter: vertex 0 is the most
//! significant bit, the last vertex the least significant one. Advancing
//! the counter clears the trailing run of ones and sets the next zero,
//! exactly like adding one.
//!
//! # Example
//!
//! ```
//! use hk_idcode::bars::{Assignments, MembershipAssignment};
//!
//! let mut a = MembershipAssignment::zeros(3);
//! assert!(a.advance());
//! assert_eq!(a.to_string(), "001");
//!
//! let all: Vec<String> = Assignments::new(2).map(|a| a.to_string()).collect();
//! assert_eq!(all, vec!["00", "01", "10", "11"]);
//! ```

use crate::geometry::NodeId;
use std::fmt;

/// One 0/1 membership value per patch vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MembershipAssignment {
    cells: Vec<bool>,
}

impl MembershipAssignment {
    /// The all-zero assignment over `len` vertices.
    pub fn zeros(len: usize) -> Self {
        Self {
            cells: vec![false; len],
        }
    }

    pub fn from_cells(cells: Vec<bool>) -> Self {
        Self { cells }
    }

    /// The assignment whose big-endian counter value is `value`.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds 64 or `value` does not fit in `len` bits.
    pub fn from_counter(value: u64, len: usize) -> Self {
        assert!(len <= u64::BITS as usize, "counter of {} bits does not fit in u64", len);
        assert!(
            len == u64::BITS as usize || value >> len == 0,
            "counter value {} does not fit in {} bits",
            value,
            len
        );
        let cells = (0..len).map(|node| (value >> (len - 1 - node)) & 1 == 1).collect();
        Self { cells }
    }

    /// Big-endian counter value of this assignment.
    ///
    /// # Panics
    ///
    /// Panics if the assignment has more than 64 vertices.
    pub fn counter(&self) -> u64 {
        assert!(self.len() <= u64::BITS as usize);
        self.cells
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    #[inline]
    pub fn is_member(&self, node: NodeId) -> bool {
        self.cells[node]
    }

    #[inline]
    pub fn set(&mut self, node: NodeId, member: bool) {
        self.cells[node] = member;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of code members.
    pub fn members(&self) -> usize {
        self.cells.iter().filter(|&&bit| bit).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Step to the next counter value in place.
    ///
    /// Returns `false`, leaving the assignment all-zero, when the counter
    /// wraps around past the all-ones state.
    pub fn advance(&mut self) -> bool {
        for cell in self.cells.iter_mut().rev() {
            if *cell {
                *cell = false;
            } else {
                *cell = true;
                return true;
            }
        }
        false
    }
}

impl fmt::Display for MembershipAssignment {
    /// Format as a string of `0`/`1`, vertex 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.cells {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Lazy iterator over all `2^len` assignments in counter order.
///
/// Each fresh iterator starts from the all-zero assignment, so two
/// iterators over the same length yield identical sequences.
#[derive(Debug, Clone)]
pub struct Assignments {
    current: Option<MembershipAssignment>,
}

impl Assignments {
    pub fn new(len: usize) -> Self {
        Self {
            current: Some(MembershipAssignment::zeros(len)),
        }
    }
}

impl Iterator for Assignments {
    type Item = MembershipAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if next.advance() {
            self.current = Some(next);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_counts_in_binary() {
        let mut a = MembershipAssignment::zeros(4);
        for expected in 1..16u64 {
            assert!(a.advance());
            assert_eq!(a.counter(), expected);
        }
        assert_eq!(a.to_string(), "1111");
    }

    #[test]
    fn test_advance_overflow_terminates() {
        let mut a = MembershipAssignment::from_counter(0b111, 3);
        assert!(!a.advance());
        assert_eq!(a.counter(), 0);
    }

    #[test]
    fn test_from_counter_is_big_endian() {
        let a = MembershipAssignment::from_counter(0b1000, 4);
        assert!(a.is_member(0));
        assert!(!a.is_member(3));
        assert_eq!(a.to_string(), "1000");
        assert_eq!(a.members(), 1);
    }

    #[test]
    fn test_iterator_is_complete_and_restartable() {
        let first: Vec<u64> = Assignments::new(3).map(|a| a.counter()).collect();
        assert_eq!(first, (0..8).collect::<Vec<_>>());
        let second: Vec<u64> = Assignments::new(3).map(|a| a.counter()).collect();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_from_counter_rejects_wide_values() {
        let _ = MembershipAssignment::from_counter(16, 4);
    }
}
