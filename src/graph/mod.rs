// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration graph over valid bars.
//!
//! - overlap: whether one bar may follow another
//! - config_graph: vertices are bars, arcs are accepted concatenations

pub mod config_graph;
pub mod overlap;

pub use config_graph::{ConfigArc, ConfigGraph};
pub use overlap::{merge, overlaps, Concatenation, MergedBar, OverlapChecker};
