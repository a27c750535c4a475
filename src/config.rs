// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Runtime configuration of a search.
//!
//! Structural parameters (bar width, overlap) are compile-time constants in
//! [`crate::geometry::constants`]; only the row count and execution knobs
//! are chosen at run time.

use crate::error::{Result, SearchError};
use crate::geometry::constants::MAX_ROWS;
use std::path::PathBuf;

/// Default name of the pattern artifact.
pub const DEFAULT_OUTPUT: &str = "code_pattern.txt";

/// Number of enumeration counter values evaluated per parallel work item.
pub const DEFAULT_CHUNK_SIZE: u64 = 1 << 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of rows k of the hexagonal grid.
    pub rows: usize,
    /// Where the pattern artifact is written.
    pub output: PathBuf,
    /// Worker threads; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Counter values per enumeration work item.
    pub chunk_size: u64,
}

impl SearchConfig {
    /// Configuration for `rows` rows with default output and threading.
    ///
    /// Fails when `rows` is zero or larger than [`MAX_ROWS`].
    pub fn new(rows: usize) -> Result<Self> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(SearchError::InvalidRows {
                rows,
                max: MAX_ROWS,
            });
        }
        Ok(Self {
            rows,
            output: PathBuf::from(DEFAULT_OUTPUT),
            threads: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.filter(|&n| n > 0);
        self
    }

    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        assert_ne!(chunk_size, 0, "chunk size must be positive");
        self.chunk_size = chunk_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rows() {
        let config = SearchConfig::new(3).unwrap();
        assert_eq!(config.rows, 3);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_rows_out_of_range() {
        assert!(matches!(
            SearchConfig::new(0),
            Err(SearchError::InvalidRows { rows: 0, .. })
        ));
        assert!(matches!(
            SearchConfig::new(MAX_ROWS + 1),
            Err(SearchError::InvalidRows { .. })
        ));
    }

    #[test]
    fn test_zero_threads_means_default_pool() {
        let config = SearchConfig::new(1).unwrap().with_threads(Some(0));
        assert_eq!(config.threads, None);
    }
}
