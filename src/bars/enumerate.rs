// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bar enumeration.
//!
//! Every membership assignment of a `rows × BAR_WIDTH` patch is a candidate,
//! `2^(4k)` of them. The counter range is cut into chunks of consecutive
//! values; each chunk is walked with [`MembershipAssignment::advance`] on a
//! worker thread, collecting its valid bars into a local buffer. Buffers are
//! concatenated in chunk order, so the result is sorted by counter value no
//! matter how many threads ran. Every buffer grows fallibly, so running out
//! of memory in any worker surfaces as [`SearchError::AllocationFailed`].

use crate::bars::{Bar, MembershipAssignment};
use crate::context::CancelToken;
use crate::error::{Result, SearchError};
use crate::geometry::constants::BAR_WIDTH;
use crate::geometry::Patch;
use crate::identify::IdentifierEngine;
use rayon::prelude::*;

/// Enumerate every valid bar of `patch` in ascending counter order.
///
/// # Panics
///
/// Panics if `patch` is not `BAR_WIDTH` columns wide, if it has more than
/// 63 cells, or if `chunk_size` is zero.
pub fn enumerate_bars(patch: &Patch, chunk_size: u64, cancel: &CancelToken) -> Result<Vec<Bar>> {
    assert_eq!(patch.width(), BAR_WIDTH, "bars are {} columns wide", BAR_WIDTH);
    assert!(patch.len() < u64::BITS as usize, "too many cells to enumerate");
    assert_ne!(chunk_size, 0);

    let bits = patch.len();
    let rows = patch.rows();
    let total: u64 = 1 << bits;
    let chunks = usize::try_from(total.div_ceil(chunk_size)).map_err(|_| {
        SearchError::AllocationFailed {
            what: "enumeration chunks",
            count: usize::MAX,
        }
    })?;

    let buffers: Vec<Vec<Bar>> = (0..chunks)
        .into_par_iter()
        .map_init(
            || IdentifierEngine::with_interior_columns(patch),
            |engine, chunk| {
                if cancel.is_cancelled() {
                    return Err(SearchError::Cancelled {
                        phase: "bar enumeration",
                    });
                }
                let start = chunk as u64 * chunk_size;
                let end = total.min(start + chunk_size);
                let mut local = Vec::new();
                let mut assignment = MembershipAssignment::from_counter(start, bits);
                for _ in start..end {
                    if engine.is_valid(&assignment) {
                        SearchError::reserve(&mut local, 1, "bar buffer")?;
                        local.push(Bar::new(rows, assignment.clone()));
                    }
                    assignment.advance();
                }
                Ok(local)
            },
        )
        .collect::<Result<_>>()?;

    let count: usize = buffers.iter().map(Vec::len).sum();
    let mut bars = Vec::new();
    bars.try_reserve_exact(count)
        .map_err(|_| SearchError::AllocationFailed {
            what: "bar list",
            count,
        })?;
    for buffer in buffers {
        bars.extend(buffer);
    }
    Ok(bars)
}
