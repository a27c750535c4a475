// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Identifying-code checks on a patch.
//!
//! The identifier of a vertex is the set of code members in its closed
//! neighborhood. A membership assignment is a valid identifying code of a
//! patch when every interior vertex has a non-empty identifier and no two
//! interior vertices share one.
//!
//! Boundary vertices are excluded because their neighbors outside the patch
//! are unknown. The conventional interior is everything except the first
//! and last column ([`interior_columns`]).

use crate::bars::MembershipAssignment;
use crate::geometry::{GridCoordinate, NodeId, Patch};
use crate::identify::Identifier;
use std::fmt;

/// The first reason an assignment fails to be an identifying code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeViolation {
    /// An interior vertex has no code member in its closed neighborhood.
    EmptyIdentifier { vertex: GridCoordinate },

    /// Two distinct interior vertices have the same identifier.
    SharedIdentifier {
        first: GridCoordinate,
        second: GridCoordinate,
        members: Vec<GridCoordinate>,
    },
}

impl CodeViolation {
    /// Translate every coordinate, e.g. from a scratch patch back to pattern space.
    pub fn map_coordinates(self, f: impl Fn(GridCoordinate) -> GridCoordinate) -> Self {
        match self {
            CodeViolation::EmptyIdentifier { vertex } => {
                CodeViolation::EmptyIdentifier { vertex: f(vertex) }
            }
            CodeViolation::SharedIdentifier {
                first,
                second,
                members,
            } => CodeViolation::SharedIdentifier {
                first: f(first),
                second: f(second),
                members: members.into_iter().map(f).collect(),
            },
        }
    }
}

impl fmt::Display for CodeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeViolation::EmptyIdentifier { vertex } => {
                write!(f, "vertex {} has an empty identifier", vertex)
            }
            CodeViolation::SharedIdentifier {
                first,
                second,
                members,
            } => {
                write!(f, "vertices {} and {} share the identifier {{", first, second)?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Interior predicate excluding the first and last column of a `width`-wide patch.
pub fn interior_columns(width: usize) -> impl Fn(GridCoordinate) -> bool {
    move |coordinate| coordinate.column != 0 && coordinate.column + 1 != width
}

/// Reusable identifying-code checker for one patch and one interior.
///
/// Holds the list of interior vertices and a scratch buffer so that the
/// enumeration and graph phases can check millions of assignments without
/// allocating. Each worker thread owns its own engine.
#[derive(Debug, Clone)]
pub struct IdentifierEngine<'p> {
    patch: &'p Patch,
    interior: Vec<NodeId>,
    scratch: Vec<(Identifier, NodeId)>,
}

impl<'p> IdentifierEngine<'p> {
    pub fn new(patch: &'p Patch, interior: impl Fn(GridCoordinate) -> bool) -> Self {
        let interior: Vec<NodeId> = patch
            .nodes()
            .filter(|&node| interior(patch.coordinate(node)))
            .collect();
        Self {
            patch,
            scratch: Vec::with_capacity(interior.len()),
            interior,
        }
    }

    /// Engine over the conventional interior (all but the outer columns).
    pub fn with_interior_columns(patch: &'p Patch) -> Self {
        Self::new(patch, interior_columns(patch.width()))
    }

    pub fn patch(&self) -> &'p Patch {
        self.patch
    }

    pub fn interior(&self) -> &[NodeId] {
        &self.interior
    }

    /// Identifier of `node`: itself if a member, plus its member neighbors.
    #[inline]
    pub fn identifier(&self, assignment: &MembershipAssignment, node: NodeId) -> Identifier {
        closed_neighborhood(self.patch, assignment, node)
    }

    /// Check the identifying-code invariant over the interior.
    pub fn check(&mut self, assignment: &MembershipAssignment) -> Result<(), CodeViolation> {
        assert_eq!(
            assignment.len(),
            self.patch.len(),
            "assignment length does not match the {}x{} patch",
            self.patch.rows(),
            self.patch.width()
        );

        self.scratch.clear();
        for &node in &self.interior {
            let id = closed_neighborhood(self.patch, assignment, node);
            if id.is_empty() {
                return Err(CodeViolation::EmptyIdentifier {
                    vertex: self.patch.coordinate(node),
                });
            }
            self.scratch.push((id, node));
        }

        // Equal identifiers end up adjacent once sorted.
        self.scratch.sort_unstable();
        for pair in self.scratch.windows(2) {
            let ((id, first), (other, second)) = (pair[0], pair[1]);
            if id == other {
                return Err(CodeViolation::SharedIdentifier {
                    first: self.patch.coordinate(first),
                    second: self.patch.coordinate(second),
                    members: id.iter().map(|n| self.patch.coordinate(n)).collect(),
                });
            }
        }
        Ok(())
    }

    pub fn is_valid(&mut self, assignment: &MembershipAssignment) -> bool {
        self.check(assignment).is_ok()
    }
}

fn closed_neighborhood(patch: &Patch, assignment: &MembershipAssignment, node: NodeId) -> Identifier {
    let mut id = Identifier::empty();
    if assignment.is_member(node) {
        id.insert(node);
    }
    for &neighbor in patch.neighbors(node) {
        if assignment.is_member(neighbor) {
            id.insert(neighbor);
        }
    }
    id
}

/// Identifier of every vertex of `patch`, indexed by vertex id.
pub fn compute_identifiers(patch: &Patch, assignment: &MembershipAssignment) -> Vec<Identifier> {
    patch
        .nodes()
        .map(|node| closed_neighborhood(patch, assignment, node))
        .collect()
}

/// Whether `assignment` is an identifying code on the vertices where `interior` holds.
pub fn is_valid_identifying_code(
    patch: &Patch,
    assignment: &MembershipAssignment,
    interior: impl Fn(GridCoordinate) -> bool,
) -> bool {
    find_violation(patch, assignment, interior).is_none()
}

/// First violation of the identifying-code invariant, if any.
pub fn find_violation(
    patch: &Patch,
    assignment: &MembershipAssignment,
    interior: impl Fn(GridCoordinate) -> bool,
) -> Option<CodeViolation> {
    IdentifierEngine::new(patch, interior).check(assignment).err()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_assignment(bits: &str) -> MembershipAssignment {
        MembershipAssignment::from_cells(bits.chars().map(|c| c == '1').collect())
    }

    #[test]
    fn test_single_row_identifiers() {
        let patch = Patch::new(1, 4);
        let ids = compute_identifiers(&patch, &path_assignment("1011"));
        assert_eq!(ids[0], Identifier::from_nodes(&[0]));
        assert_eq!(ids[1], Identifier::from_nodes(&[0, 2]));
        assert_eq!(ids[2], Identifier::from_nodes(&[2, 3]));
        assert_eq!(ids[3], Identifier::from_nodes(&[2, 3]));
    }

    #[test]
    fn test_boundary_columns_are_ignored() {
        let patch = Patch::new(1, 4);
        // Vertices 2 and 3 share {2,3}, but vertex 3 sits on the boundary.
        assert!(is_valid_identifying_code(
            &patch,
            &path_assignment("1011"),
            interior_columns(4)
        ));
        // Checking every vertex exposes the collision.
        assert!(!is_valid_identifying_code(&patch, &path_assignment("1011"), |_| true));
    }

    #[test]
    fn test_empty_identifier_is_reported() {
        let patch = Patch::new(1, 4);
        let violation = find_violation(&patch, &path_assignment("0001"), interior_columns(4));
        assert_eq!(
            violation,
            Some(CodeViolation::EmptyIdentifier {
                vertex: GridCoordinate::new(0, 1)
            })
        );
    }

    #[test]
    fn test_shared_identifier_is_reported() {
        let patch = Patch::new(1, 4);
        let violation = find_violation(&patch, &path_assignment("0110"), interior_columns(4));
        match violation {
            Some(CodeViolation::SharedIdentifier { first, second, members }) => {
                assert_eq!(first, GridCoordinate::new(0, 1));
                assert_eq!(second, GridCoordinate::new(0, 2));
                assert_eq!(members, vec![GridCoordinate::new(0, 1), GridCoordinate::new(0, 2)]);
            }
            other => panic!("expected a shared identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_two_row_identifier_uses_vertical_edges() {
        let patch = Patch::new(2, 4);
        // Only vertex 4 (row 1, column 0) is a member; vertex 0 sees it vertically.
        let mut a = MembershipAssignment::zeros(8);
        a.set(4, true);
        let ids = compute_identifiers(&patch, &a);
        assert_eq!(ids[0], Identifier::from_nodes(&[4]));
        assert_eq!(ids[5], Identifier::from_nodes(&[4]));
        assert!(ids[1].is_empty());
    }

    #[test]
    fn test_engine_is_reusable() {
        let patch = Patch::new(1, 4);
        let mut engine = IdentifierEngine::with_interior_columns(&patch);
        assert_eq!(engine.interior(), &[1, 2]);
        assert!(engine.is_valid(&path_assignment("0101")));
        assert!(!engine.is_valid(&path_assignment("0110")));
        assert!(engine.is_valid(&path_assignment("0101")));
    }

    #[test]
    fn test_violation_display() {
        let v = CodeViolation::EmptyIdentifier {
            vertex: GridCoordinate::new(1, 2),
        };
        assert_eq!(v.to_string(), "vertex (2,2) has an empty identifier");
    }
}
