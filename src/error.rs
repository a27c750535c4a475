// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the search pipeline.
//!
//! Invariant violations (an identifier larger than a closed neighborhood,
//! a vertex of degree four, a merged bar that disagrees with its parts)
//! are defects and panic instead of appearing here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that abort a search or a verification.
#[derive(Debug)]
pub enum SearchError {
    /// Row count outside `1..=max`; rejected before any work starts.
    InvalidRows { rows: usize, max: usize },

    /// A collection could not be allocated.
    AllocationFailed { what: &'static str, count: usize },

    /// The worker thread pool could not be started.
    ThreadPool { threads: usize, reason: String },

    /// The cancellation token was triggered during a phase.
    Cancelled { phase: &'static str },

    /// The configuration graph has no cycle, so no periodic code exists.
    NoCycle { nodes: usize, arcs: usize },

    /// Reading or writing a pattern file failed.
    Io { path: PathBuf, source: io::Error },

    /// A pattern file could not be parsed.
    MalformedPattern { line: usize, reason: String },

    /// A parsed pattern cannot describe a periodic strip of H_k.
    InvalidPattern { reason: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SearchError::Io {
            path: path.into(),
            source,
        }
    }

    /// Make room for `additional` more entries in `buffer`, reporting
    /// exhaustion as [`SearchError::AllocationFailed`].
    pub(crate) fn reserve<T>(
        buffer: &mut Vec<T>,
        additional: usize,
        what: &'static str,
    ) -> Result<()> {
        buffer
            .try_reserve(additional)
            .map_err(|_| SearchError::AllocationFailed {
                what,
                count: buffer.len().saturating_add(additional),
            })
    }

    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SearchError::MalformedPattern {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidRows { rows, max } => {
                write!(f, "Invalid number of rows {} (expected 1 to {})", rows, max)
            }
            SearchError::AllocationFailed { what, count } => {
                write!(f, "Could not allocate {} ({} entries)", what, count)
            }
            SearchError::ThreadPool { threads, reason } => {
                write!(f, "Could not start {} worker threads: {}", threads, reason)
            }
            SearchError::Cancelled { phase } => {
                write!(f, "Search cancelled during {}", phase)
            }
            SearchError::NoCycle { nodes, arcs } => {
                write!(
                    f,
                    "Configuration graph ({} vertices, {} arcs) has no cycle: no periodic code exists",
                    nodes, arcs
                )
            }
            SearchError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            SearchError::MalformedPattern { line, reason } => {
                write!(f, "Malformed pattern file at line {}: {}", line, reason)
            }
            SearchError::InvalidPattern { reason } => {
                write!(f, "Invalid pattern: {}", reason)
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
