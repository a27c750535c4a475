// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Finite patches of the hexagonal grid H_k.
//!
//! A patch of `rows × width` vertices is laid out on a rectangular index
//! space. Vertex `row * width + column` sits at `(row, column)`. Two kinds of
//! edges exist:
//!
//! ```text
//! row 3: 12-13-14-15
//!         |     |
//! row 2:  8--9--10-11
//!            |      |
//! row 1:  4--5--6--7
//!         |     |
//! row 0:  0--1--2--3
//! ```
//!
//! - row edges between consecutive columns of the same row;
//! - vertical edges from `(r, c)` to `(r + 1, c)` whenever `c ≡ r (mod 2)`.
//!
//! Every vertex has degree at most [`MAX_DEGREE`].

use crate::geometry::constants::MAX_DEGREE;
use crate::geometry::GridCoordinate;

/// Index of a vertex inside a [`Patch`].
pub type NodeId = usize;

/// Undirected adjacency structure of a finite hexagonal patch.
///
/// Built once per width and shared read-only by every check at that width.
#[derive(Debug, Clone)]
pub struct Patch {
    rows: usize,
    width: usize,
    adjacency: Vec<Vec<NodeId>>,
}

impl Patch {
    /// Build the patch with `rows` rows and `width` columns.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero, or if the construction produces a
    /// vertex with more than [`MAX_DEGREE`] neighbors.
    pub fn new(rows: usize, width: usize) -> Self {
        assert_ne!(rows, 0, "a patch needs at least one row");
        assert_ne!(width, 0, "a patch needs at least one column");

        let size = rows * width;
        let mut adjacency = vec![Vec::with_capacity(MAX_DEGREE); size];
        let mut link = |u: NodeId, v: NodeId| {
            adjacency[u].push(v);
            adjacency[v].push(u);
        };

        for row in 0..rows {
            for column in 0..width {
                let node = row * width + column;
                if column + 1 < width {
                    link(node, node + 1);
                }
                if row + 1 < rows && GridCoordinate::new(row, column).links_up() {
                    link(node, node + width);
                }
            }
        }

        for (node, neighbors) in adjacency.iter().enumerate() {
            assert!(
                neighbors.len() <= MAX_DEGREE,
                "vertex {} of a {}x{} patch has degree {}",
                node,
                rows,
                width,
                neighbors.len()
            );
        }

        Self {
            rows,
            width,
            adjacency,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertices (`rows * width`).
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Always false: patches have at least one vertex.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[inline]
    pub fn coordinate(&self, node: NodeId) -> GridCoordinate {
        GridCoordinate::new(node / self.width, node % self.width)
    }

    #[inline]
    pub fn node_at(&self, coordinate: GridCoordinate) -> NodeId {
        debug_assert!(coordinate.row < self.rows && coordinate.column < self.width);
        coordinate.row * self.width + coordinate.column
    }

    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    /// Iterate over all vertex ids in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}
