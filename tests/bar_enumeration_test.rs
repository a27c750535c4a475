// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

mod common;

use hk_idcode::bars::{enumerate_bars, Assignments, Bar};
use hk_idcode::geometry::constants::{BAR_WIDTH, NEW_COLUMNS};
use hk_idcode::geometry::Patch;
use hk_idcode::identify::{interior_columns, is_valid_identifying_code};
use hk_idcode::CancelToken;

#[test]
fn test_single_row_bars_by_hand() {
    let counters: Vec<u64> = common::bars(1).iter().map(Bar::counter).collect();
    assert_eq!(counters, vec![3, 5, 7, 9, 10, 11, 12, 13, 14, 15]);
}

#[test]
fn test_enumeration_agrees_with_sequential_scan() {
    for rows in 1..=2 {
        let patch = Patch::new(rows, BAR_WIDTH);
        let expected: Vec<u64> = Assignments::new(patch.len())
            .filter(|a| is_valid_identifying_code(&patch, a, interior_columns(BAR_WIDTH)))
            .map(|a| a.counter())
            .collect();
        let found: Vec<u64> = common::bars(rows).iter().map(Bar::counter).collect();
        assert_eq!(found, expected, "rows = {}", rows);
    }
}

#[test]
fn test_enumeration_is_repeatable() {
    let patch = Patch::new(3, BAR_WIDTH);
    let cancel = CancelToken::new();
    let first = enumerate_bars(&patch, 1 << 12, &cancel).unwrap();
    let second = enumerate_bars(&patch, 100, &cancel).unwrap();
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].counter() < w[1].counter()));
}

#[test]
fn test_bar_weights() {
    for bar in common::bars(2) {
        let expected = (0..bar.rows())
            .flat_map(|row| (BAR_WIDTH - NEW_COLUMNS..BAR_WIDTH).map(move |column| (row, column)))
            .filter(|&(row, column)| bar.cell(row, column))
            .count();
        assert_eq!(bar.weight(), expected, "{}", bar);
        assert!(bar.weight() <= bar.members());
    }
}

#[test]
fn test_all_ones_bar_is_valid_for_every_small_height() {
    for rows in 1..=3 {
        let bars = common::bars(rows);
        let last = bars.last().expect("some bar is valid");
        assert_eq!(last.members(), rows * BAR_WIDTH);
    }
}
