// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bar enumerator.
//!
//! - MembershipAssignment: membership bits with binary-counter stepping
//! - Assignments: restartable lazy sequence of all assignments
//! - Bar: accepted assignment with its new-column weight
//! - enumerate_bars: parallel brute-force enumeration of valid bars

pub mod assignment;
pub mod bar;
pub mod enumerate;

pub use assignment::{Assignments, MembershipAssignment};
pub use bar::Bar;
pub use enumerate::enumerate_bars;
