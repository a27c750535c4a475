// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable precomputed data for one row count.

use crate::geometry::constants::{BAR_WIDTH, MERGED_WIDTH};
use crate::geometry::Patch;

/// Patches shared read-only by every worker thread.
///
/// Both are built once per search; the per-thread identifier engines and
/// overlap checkers borrow them.
#[derive(Debug, Clone)]
pub struct MemoizedData {
    /// The `rows × BAR_WIDTH` patch that bars are assignments of.
    pub bar_patch: Patch,

    /// The `rows × MERGED_WIDTH` patch that concatenations are checked on.
    pub merged_patch: Patch,
}

impl MemoizedData {
    pub fn new(rows: usize) -> Self {
        let bar_patch = Patch::new(rows, BAR_WIDTH);
        let merged_patch = Patch::new(rows, MERGED_WIDTH);
        log::debug!(
            "[MemoizedData] {} rows: bar patch {} vertices/{} edges, merged patch {} vertices/{} edges",
            rows,
            bar_patch.len(),
            bar_patch.edge_count(),
            merged_patch.len(),
            merged_patch.edge_count()
        );
        Self {
            bar_patch,
            merged_patch,
        }
    }

    pub fn rows(&self) -> usize {
        self.bar_patch.rows()
    }
}
