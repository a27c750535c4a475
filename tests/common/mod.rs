// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use hk_idcode::bars::{enumerate_bars, Bar};
use hk_idcode::geometry::constants::{BAR_WIDTH, MERGED_WIDTH};
use hk_idcode::geometry::{GridCoordinate, Patch};
use hk_idcode::{optimize, CancelToken, ConfigGraph, HowardSolver, Pattern, PatternFile};
use std::path::PathBuf;

pub fn bars(rows: usize) -> Vec<Bar> {
    enumerate_bars(&Patch::new(rows, BAR_WIDTH), 256, &CancelToken::new())
        .expect("enumeration is not cancelled")
}

pub fn graph(rows: usize) -> ConfigGraph {
    ConfigGraph::build(&Patch::new(rows, MERGED_WIDTH), bars(rows), &CancelToken::new())
        .expect("graph build is not cancelled")
}

pub fn pattern(rows: usize) -> Pattern {
    optimize(&graph(rows), &HowardSolver).expect("every H_k has a periodic code")
}

/// A pattern file built from `(row, column)` cells with 0-based rows.
pub fn pattern_file(rows: usize, columns: usize, cells: &[(usize, usize)]) -> PatternFile {
    PatternFile {
        rows,
        columns,
        cycle_mean: 0.0,
        cells: cells
            .iter()
            .map(|&(row, column)| GridCoordinate::new(row, column))
            .collect(),
    }
}

/// A fresh path in the system temp directory, unique to this process and `name`.
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("hkcode-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}
