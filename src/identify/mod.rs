// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Identifier engine.
//!
//! - Identifier: fixed-capacity set of the members in a closed neighborhood
//! - IdentifierEngine: reusable interior check for one patch
//! - CodeViolation: why an assignment is not an identifying code

pub mod engine;
pub mod identifier;

pub use engine::{
    compute_identifiers, find_violation, interior_columns, is_valid_identifying_code,
    CodeViolation, IdentifierEngine,
};
pub use identifier::Identifier;
