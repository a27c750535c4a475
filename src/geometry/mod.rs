// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometry of the hexagonal grid with a fixed number of rows.
//!
//! - GridCoordinate: `(row, column)` position of a vertex
//! - Patch: adjacency of a finite `rows × width` window of H_k
//! - constants: bar width, overlap and neighborhood bounds

pub mod constants;
pub mod coordinate;
pub mod patch;

pub use constants::*;
pub use coordinate::GridCoordinate;
pub use patch::{NodeId, Patch};
