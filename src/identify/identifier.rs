// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Identifier type: the code members in a closed neighborhood.
//!
//! An identifier holds at most [`NEIGHBORHOOD_SIZE`] vertex ids. Entries are
//! kept sorted so that structural equality is set equality, which lets
//! identifiers be compared, hashed and sorted directly.
//!
//! # Examples
//!
//! ```
//! use hk_idcode::identify::Identifier;
//!
//! let mut a = Identifier::empty();
//! a.insert(5);
//! a.insert(2);
//!
//! let b = Identifier::from_nodes(&[2, 5]);
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 2);
//! assert_eq!(format!("{}", a), "{2,5}");
//! ```

use crate::geometry::constants::NEIGHBORHOOD_SIZE;
use crate::geometry::NodeId;
use std::fmt;

/// A fixed-capacity sorted set of vertex ids.
///
/// Unused slots always hold `0` so the derived comparisons only depend on
/// the live entries and `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    len: u8,
    nodes: [NodeId; NEIGHBORHOOD_SIZE],
}

impl Identifier {
    /// Create an empty identifier.
    pub const fn empty() -> Self {
        Self {
            len: 0,
            nodes: [0; NEIGHBORHOOD_SIZE],
        }
    }

    /// Create an identifier from a slice of distinct vertex ids.
    pub fn from_nodes(nodes: &[NodeId]) -> Self {
        let mut id = Self::empty();
        for &node in nodes {
            id.insert(node);
        }
        id
    }

    /// Insert a vertex id, keeping entries sorted. Inserting a present id is a no-op.
    ///
    /// # Panics
    ///
    /// Panics when a fifth distinct id is inserted: a closed neighborhood of
    /// the hexagonal grid never has more than four vertices, so this means
    /// the topology is wrong.
    pub fn insert(&mut self, node: NodeId) {
        let live = &self.nodes[..self.len()];
        let position = match live.binary_search(&node) {
            Ok(_) => return,
            Err(position) => position,
        };
        assert!(
            self.len() < NEIGHBORHOOD_SIZE,
            "identifier {} overflows the closed-neighborhood bound {} when adding vertex {}",
            self,
            NEIGHBORHOOD_SIZE,
            node
        );
        let len = self.len();
        self.nodes.copy_within(position..len, position + 1);
        self.nodes[position] = node;
        self.len += 1;
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.as_slice().binary_search(&node).is_ok()
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live entries in ascending order.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes[..self.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Identifier {
    /// Format as `{a,b,c}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let id = Identifier::empty();
        assert!(id.is_empty());
        assert_eq!(id.len(), 0);
        assert_eq!(id.to_string(), "{}");
    }

    #[test]
    fn test_insert_keeps_sorted() {
        let mut id = Identifier::empty();
        id.insert(9);
        id.insert(1);
        id.insert(4);
        assert_eq!(id.as_slice(), &[1, 4, 9]);
        assert!(id.contains(4));
        assert!(!id.contains(5));
    }

    #[test]
    fn test_insert_at_front_shifts_every_entry() {
        let mut id = Identifier::from_nodes(&[5, 6, 7]);
        id.insert(2);
        assert_eq!(id.as_slice(), &[2, 5, 6, 7]);

        let mut id = Identifier::from_nodes(&[1, 8]);
        id.insert(3);
        assert_eq!(id.as_slice(), &[1, 3, 8]);
        assert_eq!(id.iter().collect::<Vec<_>>(), vec![1, 3, 8]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut id = Identifier::from_nodes(&[3, 7]);
        id.insert(3);
        assert_eq!(id.len(), 2);
    }

    #[test]
    fn test_order_independent_equality() {
        let a = Identifier::from_nodes(&[12, 2, 8]);
        let b = Identifier::from_nodes(&[8, 12, 2]);
        assert_eq!(a, b);

        let c = Identifier::from_nodes(&[2, 8]);
        assert_ne!(a, c);
        // Same size, different members.
        assert_ne!(Identifier::from_nodes(&[1, 2]), Identifier::from_nodes(&[1, 3]));
    }

    #[test]
    fn test_full_capacity() {
        let id = Identifier::from_nodes(&[0, 1, 2, 3]);
        assert_eq!(id.len(), NEIGHBORHOOD_SIZE);
    }

    #[test]
    #[should_panic(expected = "overflows the closed-neighborhood bound")]
    fn test_overflow_panics() {
        let mut id = Identifier::from_nodes(&[0, 1, 2, 3]);
        id.insert(4);
    }
}
