// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The `code_pattern.txt` artifact.
//!
//! ```text
//! 2 4 1.5
//! (0,1) (1,2) (2,1) (3,2)
//! ```
//!
//! Line 1 holds the row count, the period in columns and the cycle mean.
//! Line 2 lists the member cells of one period as `(column,row)` with
//! 0-based columns and 1-based rows.

use crate::error::{Result, SearchError};
use crate::geometry::GridCoordinate;
use itertools::Itertools;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternFile {
    pub rows: usize,
    pub columns: usize,
    pub cycle_mean: f64,
    pub cells: Vec<GridCoordinate>,
}

impl PatternFile {
    /// Parse the artifact text. Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

        let (_, header) = lines
            .next()
            .ok_or_else(|| SearchError::malformed(1, "missing header"))?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(SearchError::malformed(
                1,
                format!("expected `rows columns mean`, found {:?}", header),
            ));
        }
        let rows = parse_field::<usize>(fields[0], 1, "row count")?;
        let columns = parse_field::<usize>(fields[1], 1, "column count")?;
        let cycle_mean = parse_field::<f64>(fields[2], 1, "cycle mean")?;

        let mut cells = Vec::new();
        if let Some((number, line)) = lines.next() {
            for token in line.split_whitespace() {
                cells.push(parse_cell(token, number, rows, columns)?);
            }
        }
        if let Some((number, extra)) = lines.find(|(_, line)| !line.is_empty()) {
            return Err(SearchError::malformed(
                number,
                format!("unexpected content {:?}", extra),
            ));
        }

        Ok(Self {
            rows,
            columns,
            cycle_mean,
            cells,
        })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        Self::parse(&text)
    }

    /// Render the whole file, then write it in one call.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|e| SearchError::io(path, e))
    }
}

fn parse_field<T: FromStr>(field: &str, line: usize, what: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| SearchError::malformed(line, format!("invalid {} {:?}", what, field)))
}

fn parse_cell(token: &str, line: usize, rows: usize, columns: usize) -> Result<GridCoordinate> {
    let (column, row) = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.split_once(','))
        .ok_or_else(|| SearchError::malformed(line, format!("invalid cell {:?}", token)))?;
    let column = parse_field::<usize>(column.trim(), line, "column")?;
    let row = parse_field::<usize>(row.trim(), line, "row")?;
    if row == 0 || row > rows || column >= columns {
        return Err(SearchError::malformed(
            line,
            format!("cell {} outside {} rows and {} columns", token, rows, columns),
        ));
    }
    Ok(GridCoordinate::new(row - 1, column))
}

impl FromStr for PatternFile {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PatternFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.rows, self.columns, self.cycle_mean)?;
        writeln!(f, "{}", self.cells.iter().join(" "))
    }
}
