// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Overlap compatibility of two bars.
//!
//! Bar `v2` may follow bar `v1` when the last two columns of `v1` equal the
//! first two columns of `v2` on every row, and the six-column bar obtained by
//! gluing them is itself valid:
//!
//! ```text
//!               overlap
//!              _______
//!             |       |
//! row 1:  a  b  c  d        v1
//!               c  d  e  f  v2
//!         a  b  c  d  e  f  merged
//! ```
//!
//! Columns 1 and 4 of the merged bar were boundary columns of `v1` or `v2`
//! alone; they are interior in the merge and must pass the check there.

use crate::bars::{Bar, MembershipAssignment};
use crate::geometry::constants::{BAR_WIDTH, MERGED_WIDTH, OVERLAP};
use crate::geometry::Patch;
use crate::identify::{CodeViolation, IdentifierEngine};

/// Outcome of trying to concatenate two bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Concatenation {
    /// Some overlap cell differs between the two bars.
    OverlapMismatch,
    /// The overlap agrees but the merged bar is not an identifying code.
    InvalidMerge(CodeViolation),
    /// The merged bar is valid; `weight` counts its members in the new columns.
    Accepted { weight: usize },
}

/// A valid merged bar of width [`MERGED_WIDTH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedBar {
    pub assignment: MembershipAssignment,
    pub weight: usize,
}

/// Whether the trailing overlap columns of `v1` equal the leading ones of `v2`.
pub fn overlaps(v1: &Bar, v2: &Bar) -> bool {
    assert_eq!(v1.rows(), v2.rows(), "bars of different heights");
    (0..v1.rows()).all(|row| {
        (0..OVERLAP).all(|offset| v1.cell(row, BAR_WIDTH - OVERLAP + offset) == v2.cell(row, offset))
    })
}

/// Glue `v2` after `v1`: all columns of `v1`, then the new columns of `v2`.
pub fn merge(v1: &Bar, v2: &Bar) -> MembershipAssignment {
    let mut merged = MembershipAssignment::zeros(v1.rows() * MERGED_WIDTH);
    merge_into(v1, v2, &mut merged);
    merged
}

fn merge_into(v1: &Bar, v2: &Bar, merged: &mut MembershipAssignment) {
    debug_assert_eq!(merged.len(), v1.rows() * MERGED_WIDTH);
    for row in 0..v1.rows() {
        let base = row * MERGED_WIDTH;
        for column in 0..BAR_WIDTH {
            merged.set(base + column, v1.cell(row, column));
        }
        for column in OVERLAP..BAR_WIDTH {
            merged.set(base + BAR_WIDTH + column - OVERLAP, v2.cell(row, column));
        }
    }
}

/// Reusable concatenation check over a merged-width patch.
///
/// Owns a scratch assignment and an identifier engine so each worker thread
/// can test many pairs without allocating.
#[derive(Debug, Clone)]
pub struct OverlapChecker<'p> {
    engine: IdentifierEngine<'p>,
    scratch: MembershipAssignment,
}

impl<'p> OverlapChecker<'p> {
    /// # Panics
    ///
    /// Panics if `merged_patch` is not [`MERGED_WIDTH`] columns wide.
    pub fn new(merged_patch: &'p Patch) -> Self {
        assert_eq!(
            merged_patch.width(),
            MERGED_WIDTH,
            "merged bars are {} columns wide",
            MERGED_WIDTH
        );
        Self {
            engine: IdentifierEngine::with_interior_columns(merged_patch),
            scratch: MembershipAssignment::zeros(merged_patch.len()),
        }
    }

    /// Decide whether `v2` may directly follow `v1`.
    pub fn check(&mut self, v1: &Bar, v2: &Bar) -> Concatenation {
        if !overlaps(v1, v2) {
            return Concatenation::OverlapMismatch;
        }
        merge_into(v1, v2, &mut self.scratch);
        self.assert_merge_agrees(v1, v2);
        match self.engine.check(&self.scratch) {
            Ok(()) => Concatenation::Accepted { weight: v2.weight() },
            Err(violation) => Concatenation::InvalidMerge(violation),
        }
    }

    /// The merged bar for an accepted concatenation.
    pub fn concatenate(&mut self, v1: &Bar, v2: &Bar) -> Option<MergedBar> {
        match self.check(v1, v2) {
            Concatenation::Accepted { weight } => Some(MergedBar {
                assignment: self.scratch.clone(),
                weight,
            }),
            _ => None,
        }
    }

    /// The merged bar must reproduce `v2` on its last `BAR_WIDTH` columns and
    /// carry `v2`'s new-column weight.
    fn assert_merge_agrees(&self, v1: &Bar, v2: &Bar) {
        let shift = BAR_WIDTH - OVERLAP;
        let mut new_members = 0;
        for row in 0..v1.rows() {
            for column in 0..BAR_WIDTH {
                let cell = self.scratch.is_member(row * MERGED_WIDTH + shift + column);
                assert_eq!(
                    cell,
                    v2.cell(row, column),
                    "merged bar disagrees with its successor at row {} column {}",
                    row,
                    column
                );
                if column >= OVERLAP && cell {
                    new_members += 1;
                }
            }
        }
        assert_eq!(new_members, v2.weight(), "merged bar new-column weight mismatch");
    }
}
