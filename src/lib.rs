// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimum-density identifying codes of the hexagonal grid with k rows.
//!
//! H_k is the strip of the hexagonal (brick) grid with `k` rows, infinite to
//! the left and right. A set of vertices C is an identifying code when every
//! vertex has a non-empty identifier `N[v] ∩ C` and no two vertices share
//! one. This crate finds a periodic identifying code of H_k of minimum
//! density.
//!
//! # Architecture
//!
//! The search proceeds in three phases, each parallel where it can be:
//!
//! 1. **Bar enumeration** ([`bars`]): every membership assignment of a
//!    `k × 4` patch is tested; those that are identifying codes on their two
//!    interior columns are the bars.
//! 2. **Configuration graph** ([`graph`]): an arc joins bar `u` to bar `v`
//!    when the last two columns of `u` equal the first two of `v` and the
//!    glued `k × 6` patch is still valid on its interior. The arc weight is
//!    the number of members `v` adds.
//! 3. **Optimization** ([`optimizer`]): a minimum mean cycle ([`mmc`]) of
//!    the configuration graph is the sparsest periodic code; its arcs spell
//!    out one period, two columns per arc.
//!
//! The vertex at row `r`, column `c` has its vertical edge to row `r + 1`
//! when `c ≡ r (mod 2)`:
//!
//! ```text
//! row 2:  o--o--o--o
//!            |     |
//! row 1:  o--o--o--o
//!         |     |
//! row 0:  o--o--o--o
//! ```
//!
//! [`optimizer::verify_pattern`] re-checks a written pattern independently
//! of the search, on an unrolled window of the infinite strip.

pub mod bars;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod identify;
pub mod mmc;
pub mod optimizer;
pub mod statistics;

// Re-export commonly used types
pub use config::SearchConfig;
pub use context::{CancelToken, SearchContext, SearchOutcome};
pub use error::{Result, SearchError};
pub use graph::ConfigGraph;
pub use mmc::{HowardSolver, KarpSolver, MeanCycleSolver};
pub use optimizer::{optimize, verify_pattern, Pattern, PatternFile, Verification};
