// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters are filled in by each pipeline phase after its parallel work has
//! been merged, so no counter is shared between worker threads.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(EnumCountMacro, EnumIter, IntoStaticStr, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Membership assignments examined by the bar enumerator.
    CandidateBars,
    /// Bars that satisfy the interior identifying-code check.
    AcceptedBars,
    /// Ordered bar pairs in the configuration graph's logical pair space (`n²`).
    PairSpace,
    /// Pairs the graph builder tested: those whose overlapping columns agree.
    TestedPairs,
    /// Pairs whose merged bar is valid (configuration-graph arcs).
    AcceptedArcs,
    /// Arcs on the minimum mean cycle.
    CycleArcs,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Add `amount` to the specified counter.
    pub fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// All counters with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Counters, u64)> + '_ {
        Counters::iter().map(move |counter| (counter, self.get(counter)))
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (counter, value) in self.iter() {
            let name: &'static str = counter.into();
            writeln!(f, "{:>18}: {}", name, value)?;
        }
        Ok(())
    }
}
